// qualis/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use qualis_core::domain::quality::Category;
use qualis_core::domain::testing::SuiteSelection;

#[derive(Parser)]
#[command(name = "qualis")]
#[command(about = "Weighted quality scoring and validation sessions for analytics data", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validates one subject (JSON file) against a quality category
    Validate {
        /// data_quality | analysis_quality | report_quality
        category: Category,

        /// JSON file holding the subject to validate
        #[arg(long, short)]
        input: PathBuf,

        /// Project directory (qualis.yaml, audit trail)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// Prints the factor weights of one or every category
    Weights { category: Option<Category> },

    /// Runs the automated test suites
    Test {
        /// all | unit | integration | regression | performance | security
        #[arg(long, default_value = "all")]
        suite: SuiteSelection,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// Validates a data, an analysis and a report subject, then prints the metrics report
    Report {
        #[arg(long)]
        data: PathBuf,

        #[arg(long)]
        analysis: PathBuf,

        #[arg(long)]
        report: PathBuf,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}
