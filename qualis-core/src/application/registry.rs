// qualis-core/src/application/registry.rs

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::error::DomainError;
use crate::domain::quality::{Category, CheckResult};
use crate::domain::session::{ValidationPhase, ValidationSession};

/// In-flight validation sessions, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, ValidationSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session and returns its id. Ids are regenerated until one is free.
    pub fn begin(&self, category: Category, subject: Arc<Value>) -> String {
        loop {
            let id = ValidationSession::generate_id();
            match self.sessions.entry(id) {
                Entry::Vacant(slot) => {
                    let id = slot.key().clone();
                    slot.insert(ValidationSession::with_id(id.clone(), category, subject));
                    debug!(session_id = %id, %category, "Validation session started");
                    return id;
                }
                Entry::Occupied(taken) => {
                    warn!(session_id = %taken.key(), "Session id collision, regenerating");
                }
            }
        }
    }

    pub fn end(&self, session_id: &str) -> Option<ValidationSession> {
        self.sessions.remove(session_id).map(|(_, session)| session)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn phase(&self, session_id: &str) -> Option<ValidationPhase> {
        self.sessions.get(session_id).map(|s| s.phase())
    }

    /// Category and subject of a live session. The subject is shared.
    pub fn snapshot(&self, session_id: &str) -> Option<(Category, Arc<Value>)> {
        self.sessions
            .get(session_id)
            .map(|s| (s.category, Arc::clone(&s.subject)))
    }

    pub fn record_factor(
        &self,
        session_id: &str,
        factor: &str,
        result: CheckResult,
    ) -> Result<ValidationPhase, DomainError> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| DomainError::UnknownSession(session_id.to_string()))?;
        session.insert_factor(factor, result)
    }

    /// Ends every session. Returns how many were still active.
    pub fn clear(&self) -> usize {
        let count = self.sessions.len();
        self.sessions.clear();
        count
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}

/// Ends its session when dropped, whatever path the call took.
#[derive(Debug)]
pub struct SessionGuard {
    registry: Arc<SessionRegistry>,
    session_id: String,
}

impl SessionGuard {
    pub fn new(registry: Arc<SessionRegistry>, session_id: String) -> Self {
        Self {
            registry,
            session_id,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.registry.end(&self.session_id).is_some() {
            debug!(session_id = %self.session_id, "Session ended by guard");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subject() -> Arc<Value> {
        Arc::new(json!({ "rows": 3 }))
    }

    #[test]
    fn test_begin_and_end() {
        let registry = SessionRegistry::new();
        let a = registry.begin(Category::DataQuality, subject());
        let b = registry.begin(Category::DataQuality, subject());
        assert_ne!(a, b);
        assert_eq!(registry.active_count(), 2);

        let ended = registry.end(&a).unwrap();
        assert_eq!(ended.id, a);
        assert_eq!(registry.active_count(), 1);
        assert!(registry.end(&a).is_none());
    }

    #[test]
    fn test_record_factor_on_unknown_session() {
        let registry = SessionRegistry::new();
        let err = registry
            .record_factor("validation_0_missing", "accuracy", CheckResult::clean(1.0).unwrap())
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownSession("validation_0_missing".into()));
    }

    #[test]
    fn test_record_factor_updates_phase() {
        let registry = SessionRegistry::new();
        let id = registry.begin(Category::AnalysisQuality, subject());
        let factors: Vec<&str> = crate::domain::quality::WeightTable::for_category(Category::AnalysisQuality)
            .factors()
            .collect();
        for factor in &factors {
            registry
                .record_factor(&id, factor, CheckResult::clean(0.9).unwrap())
                .unwrap();
        }
        assert_eq!(registry.phase(&id), Some(ValidationPhase::FactorsCollected));
    }

    #[test]
    fn test_guard_ends_session_on_drop() {
        let registry = Arc::new(SessionRegistry::new());
        let id = registry.begin(Category::ReportQuality, subject());
        {
            let guard = SessionGuard::new(Arc::clone(&registry), id.clone());
            assert_eq!(guard.session_id(), id);
            assert!(registry.contains(&id));
        }
        assert!(!registry.contains(&id));
    }

    #[test]
    fn test_guard_ends_session_on_panic() {
        let registry = Arc::new(SessionRegistry::new());
        let id = registry.begin(Category::ReportQuality, subject());
        let r = Arc::clone(&registry);
        let id2 = id.clone();
        let outcome = std::thread::spawn(move || {
            let _guard = SessionGuard::new(r, id2);
            panic!("checker blew up");
        })
        .join();
        assert!(outcome.is_err());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_clear_reports_count() {
        let registry = SessionRegistry::new();
        registry.begin(Category::DataQuality, subject());
        registry.begin(Category::ReportQuality, subject());
        assert_eq!(registry.session_ids().len(), 2);
        assert_eq!(registry.clear(), 2);
        assert_eq!(registry.active_count(), 0);
    }
}
