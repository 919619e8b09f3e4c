// qualis/src/commands/weights.rs
//
// USE CASE: Show the fixed weight tables.

use comfy_table::Table;

use qualis_core::domain::quality::{Category, WeightTable};

pub fn execute(category: Option<Category>) -> anyhow::Result<()> {
    let categories = match category {
        Some(c) => vec![c],
        None => Category::ALL.to_vec(),
    };

    let mut table = Table::new();
    table.set_header(vec!["Category", "Factor", "Weight"]);
    for category in categories {
        for (factor, weight) in WeightTable::for_category(category).iter() {
            table.add_row(vec![
                category.to_string(),
                factor.to_string(),
                format!("{:.2}", weight),
            ]);
        }
    }

    println!("{table}");
    Ok(())
}
