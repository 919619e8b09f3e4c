// qualis/src/commands/test.rs
//
// USE CASE: Run the automated test suites.

use std::path::PathBuf;

use qualis_core::domain::testing::SuiteSelection;

use super::bootstrap;

pub async fn execute(suite: SuiteSelection, project_dir: PathBuf) -> anyhow::Result<()> {
    let qa = bootstrap(&project_dir)?;

    eprintln!("🧪 Running {} test suite(s)...", suite);
    let summary = qa.run_automated_tests(suite).await?;
    qa.shutdown().await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    let overall = &summary.overall;
    if summary.passed {
        eprintln!(
            "✨ {} tests passed ({:.1}% coverage)",
            overall.passed_tests, overall.coverage
        );
    } else {
        eprintln!(
            "❌ {} of {} tests failed",
            overall.failed_tests, overall.total_tests
        );
        std::process::exit(1);
    }
    Ok(())
}
