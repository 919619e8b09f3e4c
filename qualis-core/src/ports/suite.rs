// qualis-core/src/ports/suite.rs

use async_trait::async_trait;

use crate::domain::testing::{SuiteOutcome, TestSuiteKind};

#[async_trait]
pub trait TestSuite: Send + Sync {
    fn kind(&self) -> TestSuiteKind;

    async fn run(&self) -> anyhow::Result<SuiteOutcome>;
}
