// qualis-core/src/domain/session.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::quality::{Category, CheckResult, WeightTable};

/// Lifecycle of one validation call. Phases only move forward one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPhase {
    Started,
    FactorsCollected,
    Scored,
    Recorded,
}

impl ValidationPhase {
    pub fn next(&self) -> Option<ValidationPhase> {
        match self {
            Self::Started => Some(Self::FactorsCollected),
            Self::FactorsCollected => Some(Self::Scored),
            Self::Scored => Some(Self::Recorded),
            Self::Recorded => None,
        }
    }
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Started => "started",
            Self::FactorsCollected => "factors_collected",
            Self::Scored => "scored",
            Self::Recorded => "recorded",
        };
        write!(f, "{}", s)
    }
}

/// An in-flight validation call. The subject is shared, never copied.
#[derive(Debug, Clone)]
pub struct ValidationSession {
    pub id: String,
    pub category: Category,
    pub started_at: DateTime<Utc>,
    pub started: Instant,
    pub subject: Arc<Value>,
    pub factors: BTreeMap<String, CheckResult>,
    phase: ValidationPhase,
}

impl ValidationSession {
    pub fn new(category: Category, subject: Arc<Value>) -> Self {
        Self::with_id(Self::generate_id(), category, subject)
    }

    pub(crate) fn with_id(id: String, category: Category, subject: Arc<Value>) -> Self {
        Self {
            id,
            category,
            started_at: Utc::now(),
            started: Instant::now(),
            subject,
            factors: BTreeMap::new(),
            phase: ValidationPhase::Started,
        }
    }

    /// `validation_<unix millis>_<uuid v4>`: readable ordering by time, with the
    /// uuid carrying the uniqueness.
    pub fn generate_id() -> String {
        format!(
            "validation_{}_{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple()
        )
    }

    pub fn phase(&self) -> ValidationPhase {
        self.phase
    }

    pub fn weights(&self) -> &'static WeightTable {
        WeightTable::for_category(self.category)
    }

    /// Factors of the category table that have no result yet, in table order.
    pub fn missing_factors(&self) -> Vec<&'static str> {
        self.weights()
            .factors()
            .filter(|f| !self.factors.contains_key(*f))
            .collect()
    }

    /// Stores a factor result. A later result for the same factor replaces the
    /// earlier one. Once every factor is present the session moves to
    /// `FactorsCollected`.
    pub fn insert_factor(&mut self, factor: &str, result: CheckResult) -> Result<ValidationPhase, DomainError> {
        if !self.weights().contains(factor) {
            return Err(DomainError::UnknownFactor {
                category: self.category,
                session_id: Some(self.id.clone()),
                factor: factor.to_string(),
            });
        }
        if self.phase > ValidationPhase::FactorsCollected {
            return Err(DomainError::PhaseViolation {
                session_id: self.id.clone(),
                from: self.phase,
                to: ValidationPhase::FactorsCollected,
            });
        }

        self.factors.insert(factor.to_string(), result);
        if self.phase == ValidationPhase::Started && self.missing_factors().is_empty() {
            self.advance(ValidationPhase::FactorsCollected)?;
        }
        Ok(self.phase)
    }

    /// Moves to `to`, which must be the phase right after the current one.
    pub fn advance(&mut self, to: ValidationPhase) -> Result<(), DomainError> {
        if self.phase.next() != Some(to) {
            return Err(DomainError::PhaseViolation {
                session_id: self.id.clone(),
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    fn session(category: Category) -> ValidationSession {
        ValidationSession::new(category, Arc::new(json!({ "events": [] })))
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| ValidationSession::generate_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("validation_")));
    }

    #[test]
    fn test_collecting_all_factors_advances_phase() {
        let mut s = session(Category::ReportQuality);
        let factors: Vec<_> = s.weights().factors().collect();
        let (last, rest) = factors.split_last().unwrap();

        for factor in rest {
            let phase = s.insert_factor(factor, CheckResult::clean(0.9).unwrap()).unwrap();
            assert_eq!(phase, ValidationPhase::Started);
        }
        assert_eq!(s.missing_factors(), vec![*last]);

        let phase = s.insert_factor(last, CheckResult::clean(0.9).unwrap()).unwrap();
        assert_eq!(phase, ValidationPhase::FactorsCollected);
        assert!(s.missing_factors().is_empty());
    }

    #[test]
    fn test_unknown_factor_is_rejected() {
        let mut s = session(Category::DataQuality);
        let err = s
            .insert_factor("crossValidation", CheckResult::clean(1.0).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownFactor {
                category: Category::DataQuality,
                session_id: Some(s.id.clone()),
                factor: "crossValidation".into()
            }
        );
    }

    #[test]
    fn test_phases_cannot_be_skipped() {
        let mut s = session(Category::DataQuality);
        assert!(matches!(
            s.advance(ValidationPhase::Scored),
            Err(DomainError::PhaseViolation { .. })
        ));
        assert_eq!(s.phase(), ValidationPhase::Started);
    }

    #[test]
    fn test_subject_is_shared_not_copied() {
        let subject = Arc::new(json!({ "large": true }));
        let s = ValidationSession::new(Category::DataQuality, subject.clone());
        assert!(Arc::ptr_eq(&s.subject, &subject));
    }
}
