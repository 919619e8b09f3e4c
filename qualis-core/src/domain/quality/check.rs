// qualis-core/src/domain/quality/check.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Info,
    #[default]
    Warning,
    Critical,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// A single finding raised by a checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: IssueSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Issue {
    pub fn new(severity: IssueSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            field: None,
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Critical, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(IssueSeverity::Info, message)
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Outcome of one factor check. The score is guaranteed to be in [0, 1];
/// the value cannot be altered once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    score: f64,
    issues: Vec<Issue>,
}

impl CheckResult {
    pub fn new(score: f64, issues: Vec<Issue>) -> Result<Self, DomainError> {
        // NaN fails the range test as well
        if !(0.0..=1.0).contains(&score) {
            return Err(DomainError::ScoreOutOfRange { score });
        }
        Ok(Self { score, issues })
    }

    /// A result without issues.
    pub fn clean(score: f64) -> Result<Self, DomainError> {
        Self::new(score, Vec::new())
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert!(CheckResult::clean(0.0).is_ok());
        assert!(CheckResult::clean(1.0).is_ok());
    }

    #[test]
    fn test_out_of_range_scores_are_rejected() {
        assert!(matches!(
            CheckResult::clean(1.01),
            Err(DomainError::ScoreOutOfRange { .. })
        ));
        assert!(CheckResult::clean(-0.1).is_err());
        assert!(CheckResult::clean(f64::NAN).is_err());
    }

    #[test]
    fn test_issue_builders() {
        let issue = Issue::critical("negative duration").with_field("duration_ms");
        assert_eq!(issue.severity, IssueSeverity::Critical);
        assert_eq!(issue.field.as_deref(), Some("duration_ms"));

        let result = CheckResult::new(0.4, vec![issue.clone()]).unwrap();
        assert!(result.has_issues());
        assert_eq!(result.issues(), &[issue]);
    }

    #[test]
    fn test_issue_serialization_skips_empty_field() {
        let json = serde_json::to_value(Issue::info("sampled")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "severity": "info", "message": "sampled" })
        );
    }
}
