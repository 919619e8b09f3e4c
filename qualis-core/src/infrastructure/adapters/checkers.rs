// qualis-core/src/infrastructure/adapters/checkers.rs

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::quality::{Category, CheckResult};
use crate::ports::checker::FactorChecker;

/// Always returns the same clean score.
#[derive(Debug, Clone)]
pub struct StaticChecker {
    factor: String,
    result: CheckResult,
}

impl StaticChecker {
    pub fn new(factor: impl Into<String>, score: f64) -> Result<Self, DomainError> {
        Ok(Self {
            factor: factor.into(),
            result: CheckResult::clean(score)?,
        })
    }
}

#[async_trait]
impl FactorChecker for StaticChecker {
    fn factor(&self) -> &str {
        &self.factor
    }

    async fn check(&self, _subject: &Value) -> anyhow::Result<CheckResult> {
        Ok(self.result.clone())
    }
}

/// Adapts a synchronous closure into a checker.
pub struct FnChecker<F> {
    factor: String,
    check: F,
}

impl<F> FnChecker<F>
where
    F: Fn(&Value) -> anyhow::Result<CheckResult> + Send + Sync,
{
    pub fn new(factor: impl Into<String>, check: F) -> Self {
        Self {
            factor: factor.into(),
            check,
        }
    }
}

impl<F> fmt::Debug for FnChecker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnChecker").field("factor", &self.factor).finish()
    }
}

#[async_trait]
impl<F> FactorChecker for FnChecker<F>
where
    F: Fn(&Value) -> anyhow::Result<CheckResult> + Send + Sync,
{
    fn factor(&self) -> &str {
        &self.factor
    }

    async fn check(&self, subject: &Value) -> anyhow::Result<CheckResult> {
        (self.check)(subject)
    }
}

const BASELINE_SCORES: [(Category, &str, f64); 18] = [
    (Category::DataQuality, "completeness", 0.95),
    (Category::DataQuality, "accuracy", 0.98),
    (Category::DataQuality, "consistency", 0.96),
    (Category::DataQuality, "validity", 0.97),
    (Category::DataQuality, "dataTypes", 0.95),
    (Category::DataQuality, "ranges", 0.98),
    (Category::AnalysisQuality, "reliability", 0.99),
    (Category::AnalysisQuality, "consistency", 0.96),
    (Category::AnalysisQuality, "accuracy", 0.97),
    (Category::AnalysisQuality, "crossValidation", 0.96),
    (Category::AnalysisQuality, "statistical", 0.99),
    (Category::AnalysisQuality, "businessLogic", 0.98),
    (Category::ReportQuality, "completeness", 0.97),
    (Category::ReportQuality, "consistency", 0.98),
    (Category::ReportQuality, "format", 0.99),
    (Category::ReportQuality, "content", 0.97),
    (Category::ReportQuality, "integrity", 0.98),
    (Category::ReportQuality, "crossReference", 0.96),
];

/// Placeholder checkers with fixed scores for every factor of every category.
/// They ignore the subject.
pub fn baseline_checkers() -> Result<Vec<(Category, Arc<dyn FactorChecker>)>, DomainError> {
    BASELINE_SCORES
        .iter()
        .map(|(category, factor, score)| {
            let checker: Arc<dyn FactorChecker> = Arc::new(StaticChecker::new(*factor, *score)?);
            Ok((*category, checker))
        })
        .collect()
}
