// qualis/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON output.
    // RUST_LOG=qualis_core=debug qualis validate ...
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            category,
            input,
            project_dir,
        } => commands::validate::execute(category, input, project_dir).await?,

        Commands::Weights { category } => commands::weights::execute(category)?,

        Commands::Test { suite, project_dir } => commands::test::execute(suite, project_dir).await?,

        Commands::Report {
            data,
            analysis,
            report,
            project_dir,
        } => commands::report::execute(data, analysis, report, project_dir).await?,
    }

    Ok(())
}
