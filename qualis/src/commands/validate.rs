// qualis/src/commands/validate.rs
//
// USE CASE: Validate one subject against a category.

use std::path::PathBuf;

use qualis_core::QualisError;
use qualis_core::domain::quality::Category;

use super::{bootstrap, read_subject};

pub async fn execute(category: Category, input: PathBuf, project_dir: PathBuf) -> anyhow::Result<()> {
    let qa = bootstrap(&project_dir)?;
    let subject = read_subject(&input)?;

    eprintln!("🔎 Validating {} ({})", input.display(), category);
    let outcome = qa.validate(category, subject).await;
    qa.shutdown().await?;

    match outcome {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.passed {
                eprintln!("✅ {} passed with {:.4}", category, result.score);
            } else {
                let threshold = qa.config().quality_thresholds.for_category(category);
                eprintln!(
                    "❌ {} scored {:.4}, below the {:.4} threshold",
                    category, result.score, threshold
                );
                std::process::exit(1);
            }
        }
        Err(QualisError::Domain(e)) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
