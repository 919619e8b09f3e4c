// qualis-core/src/ports/audit.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::quality::ValidationResult;
use crate::error::QualisError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    /// `<category>_validation`
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub result: ValidationResult,
}

impl AuditRecord {
    pub fn for_result(result: &ValidationResult) -> Self {
        Self {
            action: result.category.audit_action(),
            timestamp: Utc::now(),
            result: result.clone(),
        }
    }
}

/// Append-only trail of recorded validations.
#[async_trait]
pub trait AuditSink: Send + Sync {
    fn append(&self, record: AuditRecord);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persists whatever has been appended so far. In-memory sinks do nothing.
    async fn flush(&self) -> Result<(), QualisError>;
}
