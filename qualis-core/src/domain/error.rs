// qualis-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::quality::Category;
use crate::domain::session::ValidationPhase;
use crate::domain::testing::TestSuiteKind;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    // --- AGGREGATION ---
    #[error("Missing factor '{factor}' for {category} (session {session_id})")]
    #[diagnostic(
        code(qualis::domain::missing_factor),
        help("Every factor of the {category} weight table needs a check result before scoring.")
    )]
    MissingFactor {
        category: Category,
        session_id: String,
        factor: String,
    },

    #[error(
        "Unknown factor '{factor}' for {category}{}",
        .session_id.as_deref().map(|id| format!(" (session {id})")).unwrap_or_default()
    )]
    #[diagnostic(
        code(qualis::domain::unknown_factor),
        help("Factor names must match the {category} weight table exactly (camelCase).")
    )]
    UnknownFactor {
        category: Category,
        session_id: Option<String>,
        factor: String,
    },

    #[error("Unknown category: {0}")]
    #[diagnostic(
        code(qualis::domain::unknown_category),
        help("Expected one of: data_quality, analysis_quality, report_quality.")
    )]
    UnknownCategory(String),

    #[error("Invalid weight table: {0}")]
    #[diagnostic(code(qualis::domain::weight_table))]
    InvalidWeightTable(String),

    #[error("Score {score} is outside [0, 1]")]
    #[diagnostic(code(qualis::domain::score_range))]
    ScoreOutOfRange { score: f64 },

    // --- FACTOR EXECUTION ---
    #[error("Factor '{factor}' timed out after {timeout_ms}ms ({category}, session {session_id})")]
    #[diagnostic(
        code(qualis::domain::factor_timeout),
        help("Raise `factor_timeout_ms` or make the checker non-blocking.")
    )]
    FactorTimeout {
        category: Category,
        session_id: String,
        factor: String,
        timeout_ms: u64,
    },

    #[error(
        "Factor '{}' failed ({category}, session {session_id}): {cause}",
        .factor.as_deref().unwrap_or("unknown")
    )]
    #[diagnostic(code(qualis::domain::factor_execution))]
    FactorExecution {
        category: Category,
        session_id: String,
        factor: Option<String>,
        cause: String,
    },

    // --- SESSIONS ---
    #[error("Validation session '{0}' is not active")]
    #[diagnostic(
        code(qualis::domain::unknown_session),
        help("The session was never started, already finalized, or ended early.")
    )]
    UnknownSession(String),

    #[error("Validation session '{session_id}' ({category}) was ended before its checks completed")]
    #[diagnostic(code(qualis::domain::session_abandoned))]
    SessionAbandoned {
        category: Category,
        session_id: String,
    },

    #[error("Session '{session_id}' cannot move from {from} to {to}")]
    #[diagnostic(code(qualis::domain::phase))]
    PhaseViolation {
        session_id: String,
        from: ValidationPhase,
        to: ValidationPhase,
    },

    // --- FEATURE FLAGS ---
    #[error("Validation of {0} is disabled by configuration")]
    #[diagnostic(code(qualis::domain::category_disabled))]
    CategoryDisabled(Category),

    #[error("Automated testing is disabled by configuration")]
    #[diagnostic(code(qualis::domain::testing_disabled))]
    TestingDisabled,

    #[error("Quality metrics are disabled by configuration")]
    #[diagnostic(code(qualis::domain::metrics_disabled))]
    MetricsDisabled,

    // --- TEST SUITES ---
    #[error("Unknown test suite: {0}")]
    #[diagnostic(
        code(qualis::domain::unknown_suite),
        help("Expected one of: all, unit, integration, regression, performance, security.")
    )]
    UnknownSuite(String),

    #[error("Test suite '{suite}' failed to run: {cause}")]
    #[diagnostic(code(qualis::domain::suite_execution))]
    SuiteExecution { suite: TestSuiteKind, cause: String },
}

impl DomainError {
    /// Session the error belongs to, when it came out of a validation call.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            DomainError::MissingFactor { session_id, .. }
            | DomainError::FactorTimeout { session_id, .. }
            | DomainError::FactorExecution { session_id, .. }
            | DomainError::SessionAbandoned { session_id, .. }
            | DomainError::PhaseViolation { session_id, .. } => Some(session_id),
            DomainError::UnknownSession(id) => Some(id),
            DomainError::UnknownFactor { session_id, .. } => session_id.as_deref(),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            DomainError::MissingFactor { category, .. }
            | DomainError::UnknownFactor { category, .. }
            | DomainError::FactorTimeout { category, .. }
            | DomainError::FactorExecution { category, .. }
            | DomainError::SessionAbandoned { category, .. } => Some(*category),
            DomainError::CategoryDisabled(category) => Some(*category),
            _ => None,
        }
    }

    /// The offending factor, when one is known.
    pub fn factor(&self) -> Option<&str> {
        match self {
            DomainError::MissingFactor { factor, .. }
            | DomainError::UnknownFactor { factor, .. }
            | DomainError::FactorTimeout { factor, .. } => Some(factor),
            DomainError::FactorExecution { factor, .. } => factor.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_fields_are_exposed() {
        let err = DomainError::FactorTimeout {
            category: Category::AnalysisQuality,
            session_id: "validation_1_abc".into(),
            factor: "statistical".into(),
            timeout_ms: 50,
        };
        assert_eq!(err.session_id(), Some("validation_1_abc"));
        assert_eq!(err.category(), Some(Category::AnalysisQuality));
        assert_eq!(err.factor(), Some("statistical"));
    }

    #[test]
    fn test_execution_error_without_factor() {
        let err = DomainError::FactorExecution {
            category: Category::DataQuality,
            session_id: "s".into(),
            factor: None,
            cause: "boom".into(),
        };
        assert_eq!(err.factor(), None);
        assert_eq!(
            err.to_string(),
            "Factor 'unknown' failed (data_quality, session s): boom"
        );
    }

    #[test]
    fn test_missing_factor_message_names_factor() {
        let err = DomainError::MissingFactor {
            category: Category::DataQuality,
            session_id: "s".into(),
            factor: "ranges".into(),
        };
        assert!(err.to_string().contains("'ranges'"));
    }

    #[test]
    fn test_unknown_factor_carries_session_when_known() {
        let err = DomainError::UnknownFactor {
            category: Category::DataQuality,
            session_id: Some("validation_1_abc".into()),
            factor: "format".into(),
        };
        assert_eq!(err.session_id(), Some("validation_1_abc"));
        assert_eq!(
            err.to_string(),
            "Unknown factor 'format' for data_quality (session validation_1_abc)"
        );

        let err = DomainError::UnknownFactor {
            category: Category::DataQuality,
            session_id: None,
            factor: "format".into(),
        };
        assert_eq!(err.session_id(), None);
        assert_eq!(err.to_string(), "Unknown factor 'format' for data_quality");
    }
}
