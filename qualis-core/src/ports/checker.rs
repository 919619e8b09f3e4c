// qualis-core/src/ports/checker.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::quality::CheckResult;

/// Scores one factor of a validation subject.
///
/// Implementations run concurrently with the other factors of the same call and
/// under the configured per-factor timeout. Any error they return fails the whole
/// validation; it is never turned into a score. A panic is reported as a failed
/// factor in unwinding builds, but aborts the process under `panic = "abort"`,
/// so checkers must not panic.
#[async_trait]
pub trait FactorChecker: Send + Sync {
    /// Name of the factor in the category weight table (camelCase).
    fn factor(&self) -> &str;

    async fn check(&self, subject: &Value) -> anyhow::Result<CheckResult>;
}
