// qualis/src/commands/report.rs
//
// USE CASE: Validate all three categories and print the quality metrics report.

use std::path::PathBuf;

use qualis_core::domain::quality::Category;

use super::{bootstrap, read_subject};

pub async fn execute(
    data: PathBuf,
    analysis: PathBuf,
    report: PathBuf,
    project_dir: PathBuf,
) -> anyhow::Result<()> {
    let qa = bootstrap(&project_dir)?;
    let data = read_subject(&data)?;
    let analysis = read_subject(&analysis)?;
    let report = read_subject(&report)?;

    eprintln!("📊 Validating data, analysis and report...");
    let (data_res, analysis_res, report_res) = tokio::join!(
        qa.validate(Category::DataQuality, data),
        qa.validate(Category::AnalysisQuality, analysis),
        qa.validate(Category::ReportQuality, report),
    );

    for (category, outcome) in [
        (Category::DataQuality, data_res),
        (Category::AnalysisQuality, analysis_res),
        (Category::ReportQuality, report_res),
    ] {
        match outcome {
            Ok(result) => eprintln!(
                "   {} {:<17} {:.4}",
                if result.passed { "✅" } else { "❌" },
                category.as_str(),
                result.score
            ),
            Err(e) => eprintln!("   💥 {:<17} {}", category.as_str(), e),
        }
    }

    let metrics = qa.metrics_report()?;
    qa.shutdown().await?;

    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}
