// qualis-core/src/domain/testing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestSuiteKind {
    Unit,
    Integration,
    Regression,
    Performance,
    Security,
}

impl TestSuiteKind {
    pub const ALL: [TestSuiteKind; 5] = [
        TestSuiteKind::Unit,
        TestSuiteKind::Integration,
        TestSuiteKind::Regression,
        TestSuiteKind::Performance,
        TestSuiteKind::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::Regression => "regression",
            Self::Performance => "performance",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for TestSuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TestSuiteKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestSuiteKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownSuite(s.to_string()))
    }
}

/// Which suites an automated run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteSelection {
    All,
    Only(TestSuiteKind),
}

impl SuiteSelection {
    pub fn includes(&self, kind: TestSuiteKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => *only == kind,
        }
    }
}

impl fmt::Display for SuiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(kind) => write!(f, "{}", kind),
        }
    }
}

impl std::str::FromStr for SuiteSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuiteOutcome {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    /// Percentage, 0..=100.
    pub coverage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallTestResult {
    pub success: bool,
    pub total_tests: u32,
    pub passed_tests: u32,
    pub failed_tests: u32,
    pub coverage: f64,
}

impl OverallTestResult {
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a SuiteOutcome>,
    {
        let (total, passed, failed) = outcomes
            .into_iter()
            .fold((0u32, 0u32, 0u32), |(t, p, f), o| {
                (t + o.total, p + o.passed, f + o.failed)
            });
        let coverage = if total > 0 {
            f64::from(passed) / f64::from(total) * 100.0
        } else {
            0.0
        };
        Self {
            success: failed == 0,
            total_tests: total,
            passed_tests: passed,
            failed_tests: failed,
            coverage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRunSummary {
    pub selection: SuiteSelection,
    pub timestamp: DateTime<Utc>,
    pub results: BTreeMap<TestSuiteKind, SuiteOutcome>,
    pub overall: OverallTestResult,
    pub processing_time_ms: u64,
    pub passed: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn outcome(total: u32, passed: u32, failed: u32) -> SuiteOutcome {
        SuiteOutcome {
            total,
            passed,
            failed,
            coverage: 100.0,
        }
    }

    #[test]
    fn test_overall_sums_and_coverage() {
        let outcomes = [outcome(50, 48, 2), outcome(30, 30, 0)];
        let overall = OverallTestResult::from_outcomes(&outcomes);
        assert_eq!(overall.total_tests, 80);
        assert_eq!(overall.passed_tests, 78);
        assert_eq!(overall.failed_tests, 2);
        assert!(!overall.success);
        assert!((overall.coverage - 97.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_run_has_zero_coverage() {
        let overall = OverallTestResult::from_outcomes(&[]);
        assert!(overall.success);
        assert_eq!(overall.coverage, 0.0);
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("all".parse::<SuiteSelection>().unwrap(), SuiteSelection::All);
        assert_eq!(
            "Security".parse::<SuiteSelection>().unwrap(),
            SuiteSelection::Only(TestSuiteKind::Security)
        );
        assert!(matches!(
            "smoke".parse::<SuiteSelection>(),
            Err(DomainError::UnknownSuite(_))
        ));
    }

    #[test]
    fn test_selection_includes() {
        assert!(SuiteSelection::All.includes(TestSuiteKind::Unit));
        assert!(!SuiteSelection::Only(TestSuiteKind::Unit).includes(TestSuiteKind::Security));
    }
}
