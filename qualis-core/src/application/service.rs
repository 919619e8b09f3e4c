// qualis-core/src/application/service.rs

use chrono::Utc;
use dashmap::DashMap;
use futures::FutureExt;
use futures::future::{join_all, try_join_all};
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::application::checkers::CheckerRegistry;
use crate::application::recorder::ResultRecorder;
use crate::application::registry::{SessionGuard, SessionRegistry};
use crate::domain::error::DomainError;
use crate::domain::project::QualisConfig;
use crate::domain::quality::report::recommendations;
use crate::domain::quality::result::describe_subject;
use crate::domain::quality::utils::collect_issues;
use crate::domain::quality::{
    Category, CheckResult, QualityMetricsReport, QualitySummary, ValidationResult,
};
use crate::domain::session::ValidationPhase;
use crate::domain::testing::{
    OverallTestResult, SuiteOutcome, SuiteSelection, TestRunSummary, TestSuiteKind,
};
use crate::error::QualisError;
use crate::infrastructure::adapters::MemoryAuditSink;
use crate::ports::audit::{AuditRecord, AuditSink};
use crate::ports::checker::FactorChecker;
use crate::ports::suite::TestSuite;

const GENERATOR: &str = "qualis";

/// The QA service: opens validation sessions, runs the registered factor
/// checkers, scores and records results.
///
/// Every piece of mutable state is owned by the instance, so it can be shared
/// behind an `Arc` between tasks.
pub struct QualityAssurance {
    config: QualisConfig,
    registry: Arc<SessionRegistry>,
    recorder: ResultRecorder,
    checkers: CheckerRegistry,
    suites: BTreeMap<TestSuiteKind, Arc<dyn TestSuite>>,
    audit: Arc<dyn AuditSink>,
    test_results: DashMap<SuiteSelection, TestRunSummary>,
}

impl QualityAssurance {
    pub fn new(config: QualisConfig, checkers: CheckerRegistry) -> Self {
        Self {
            config,
            registry: Arc::new(SessionRegistry::new()),
            recorder: ResultRecorder::new(),
            checkers,
            suites: BTreeMap::new(),
            audit: Arc::new(MemoryAuditSink::new()),
            test_results: DashMap::new(),
        }
    }

    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Registers a suite; a later suite of the same kind replaces the earlier one.
    pub fn with_test_suite(mut self, suite: Arc<dyn TestSuite>) -> Self {
        self.suites.insert(suite.kind(), suite);
        self
    }

    pub fn with_test_suites<I>(self, suites: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn TestSuite>>,
    {
        suites.into_iter().fold(self, Self::with_test_suite)
    }

    pub fn with_registry(mut self, registry: Arc<SessionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &QualisConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn active_count(&self) -> usize {
        self.registry.active_count()
    }

    // --- VALIDATION LIFECYCLE ---

    #[instrument(skip(self, subject), fields(category = %category))]
    pub fn begin_validation(&self, category: Category, subject: Arc<Value>) -> Result<String, QualisError> {
        if !self.config.category_enabled(category) {
            warn!("Validation requested for a disabled category");
            return Err(DomainError::CategoryDisabled(category).into());
        }
        let session_id = self.registry.begin(category, subject);
        info!(session_id = %session_id, "Validation started");
        Ok(session_id)
    }

    pub fn record_factor(
        &self,
        session_id: &str,
        factor: &str,
        result: CheckResult,
    ) -> Result<ValidationPhase, QualisError> {
        let phase = self.registry.record_factor(session_id, factor, result)?;
        debug!(session_id, factor, %phase, "Factor recorded");
        Ok(phase)
    }

    /// Runs every registered checker of the session's category concurrently,
    /// each under the configured timeout, and records their results.
    ///
    /// The first factor to fail aborts the call at once: the checks still in
    /// flight are dropped, the session is ended and the error is counted. If the
    /// session was ended while the checks were running, their results are
    /// discarded and `SessionAbandoned` is returned.
    #[instrument(skip(self))]
    pub async fn run_checkers(&self, session_id: &str) -> Result<ValidationPhase, QualisError> {
        let (category, subject) = self
            .registry
            .snapshot(session_id)
            .ok_or_else(|| DomainError::UnknownSession(session_id.to_string()))?;

        let checkers = self.checkers.checkers_for(category);
        debug!(%category, checkers = checkers.len(), "Running factor checkers");

        let outcome = try_join_all(
            checkers
                .iter()
                .map(|checker| self.run_one(category, session_id, checker.as_ref(), &subject)),
        )
        .await;

        if !self.registry.contains(session_id) {
            warn!(%category, "Session ended while checks were running, discarding results");
            return Err(DomainError::SessionAbandoned {
                category,
                session_id: session_id.to_string(),
            }
            .into());
        }

        let results = match outcome {
            Ok(results) => results,
            Err(err) => return Err(self.abort(category, session_id, err)),
        };

        let mut phase = self
            .registry
            .phase(session_id)
            .unwrap_or(ValidationPhase::Started);
        for (factor, result) in results {
            let recorded = self
                .registry
                .record_factor(session_id, &factor, result)
                .map_err(|e| match e {
                    DomainError::UnknownSession(_) => DomainError::SessionAbandoned {
                        category,
                        session_id: session_id.to_string(),
                    },
                    other => other,
                });
            match recorded {
                Ok(p) => phase = p,
                Err(err) => return Err(self.abort(category, session_id, err)),
            }
        }
        Ok(phase)
    }

    /// A checker that panics is reported as a `FactorExecution` failure. This
    /// needs an unwinding build; with `panic = "abort"` the process still exits.
    async fn run_one(
        &self,
        category: Category,
        session_id: &str,
        checker: &dyn FactorChecker,
        subject: &Value,
    ) -> Result<(String, CheckResult), DomainError> {
        let factor = checker.factor().to_string();
        let timeout = self.config.factor_timeout();
        let check = AssertUnwindSafe(checker.check(subject)).catch_unwind();
        let cause = match tokio::time::timeout(timeout, check).await {
            Ok(Ok(Ok(result))) => return Ok((factor, result)),
            Ok(Ok(Err(cause))) => format!("{:#}", cause),
            Ok(Err(payload)) => format!("checker panicked: {}", panic_message(payload.as_ref())),
            Err(_) => {
                return Err(DomainError::FactorTimeout {
                    category,
                    session_id: session_id.to_string(),
                    factor,
                    timeout_ms: self.config.factor_timeout_ms,
                });
            }
        };
        Err(DomainError::FactorExecution {
            category,
            session_id: session_id.to_string(),
            factor: Some(factor),
            cause,
        })
    }

    fn abort(&self, category: Category, session_id: &str, err: DomainError) -> QualisError {
        if !matches!(err, DomainError::SessionAbandoned { .. }) {
            self.registry.end(session_id);
            self.recorder.record_error(category);
        }
        error!(session_id, %category, factor = ?err.factor(), error = %err, "Validation aborted");
        err.into()
    }

    /// Scores the collected factors, records the result and ends the session.
    /// The session is ended on every path, including `MissingFactor`.
    #[instrument(skip(self))]
    pub fn finalize_validation(&self, session_id: &str) -> Result<ValidationResult, QualisError> {
        let mut session = self
            .registry
            .end(session_id)
            .ok_or_else(|| DomainError::UnknownSession(session_id.to_string()))?;
        let category = session.category;

        let score = match session
            .weights()
            .aggregate(session.factors.iter().map(|(f, r)| (f.as_str(), r.score())))
        {
            Ok(score) => score,
            Err(e) => {
                let err = e.in_session(category, session_id);
                self.recorder.record_error(category);
                error!(%category, factor = ?err.factor(), error = %err, "Scoring failed");
                return Err(err.into());
            }
        };
        session.advance(ValidationPhase::Scored)?;

        let threshold = self.config.quality_thresholds.for_category(category);
        let details = std::mem::take(&mut session.factors);
        let result = ValidationResult {
            session_id: session.id.clone(),
            timestamp: Utc::now(),
            category,
            passed: score >= threshold,
            score,
            issues: collect_issues(details.values()),
            details,
            processing_time_ms: elapsed_ms(session.started),
            metadata: describe_subject(category, &session.subject),
        };

        self.recorder.record(&result);
        session.advance(ValidationPhase::Recorded)?;
        if self.config.features.enable_audit_trail {
            self.audit.append(AuditRecord::for_result(&result));
        }

        info!(
            %category,
            score = result.score,
            threshold,
            passed = result.passed,
            issues = result.issue_count(),
            "Validation finalized"
        );
        Ok(result)
    }

    /// Abandons a call. Returns whether the session was still active.
    pub fn end_validation(&self, session_id: &str) -> bool {
        let ended = self.registry.end(session_id).is_some();
        if ended {
            info!(session_id, "Validation ended early");
        }
        ended
    }

    /// Begin, run the checkers and finalize, with the session ended on every
    /// path. A result that did not pass is still `Ok`.
    pub async fn validate(&self, category: Category, subject: Arc<Value>) -> Result<ValidationResult, QualisError> {
        let session_id = self.begin_validation(category, subject)?;
        let _guard = SessionGuard::new(Arc::clone(&self.registry), session_id.clone());
        self.run_checkers(&session_id).await?;
        self.finalize_validation(&session_id)
    }

    // --- READ SIDE ---

    pub fn summary(&self) -> QualitySummary {
        QualitySummary {
            stats: self.recorder.stats(),
            active_validations: self.registry.active_count(),
            total_issues: self.recorder.issue_count(),
            audit_trail_entries: self.audit.len(),
            quality_thresholds: self.config.quality_thresholds.clone(),
            features: self.config.features.clone(),
        }
    }

    pub fn metrics_report(&self) -> Result<QualityMetricsReport, QualisError> {
        if !self.config.features.enable_quality_metrics {
            return Err(DomainError::MetricsDisabled.into());
        }
        let stats = self.recorder.stats();
        Ok(QualityMetricsReport {
            timestamp: Utc::now(),
            last_scores: stats.last_scores.clone(),
            trend: self.recorder.trend(),
            issues: self.recorder.issues(),
            recommendations: recommendations(&stats, &self.config.quality_thresholds),
            overall_score: stats.overall_quality_score,
            generator: GENERATOR,
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    // --- AUTOMATED TESTS ---

    /// Runs the selected suites concurrently. Kinds switched off in the testing
    /// framework are skipped.
    #[instrument(skip(self), fields(selection = %selection))]
    pub async fn run_automated_tests(&self, selection: SuiteSelection) -> Result<TestRunSummary, QualisError> {
        if !self.config.features.enable_automated_testing {
            return Err(DomainError::TestingDisabled.into());
        }
        if let SuiteSelection::Only(kind) = selection {
            if !self.suites.contains_key(&kind) {
                return Err(DomainError::UnknownSuite(kind.to_string()).into());
            }
        }

        let start = Instant::now();
        let selected: Vec<&Arc<dyn TestSuite>> = self
            .suites
            .iter()
            .filter(|(kind, _)| selection.includes(**kind))
            .filter(|(kind, _)| {
                let enabled = self.config.testing_framework.enabled(**kind);
                if !enabled {
                    debug!(suite = %kind, "Suite disabled, skipping");
                }
                enabled
            })
            .map(|(_, suite)| suite)
            .collect();

        let outcomes = join_all(selected.iter().map(|suite| async move {
            let kind = suite.kind();
            suite
                .run()
                .await
                .map(|outcome| (kind, outcome))
                .map_err(|e| DomainError::SuiteExecution {
                    suite: kind,
                    cause: format!("{:#}", e),
                })
        }))
        .await;

        let results: BTreeMap<TestSuiteKind, SuiteOutcome> = outcomes.into_iter().collect::<Result<_, _>>()?;
        let overall = OverallTestResult::from_outcomes(results.values());
        let summary = TestRunSummary {
            selection,
            timestamp: Utc::now(),
            overall,
            passed: overall.success,
            processing_time_ms: elapsed_ms(start),
            results,
        };

        info!(
            total = overall.total_tests,
            failed = overall.failed_tests,
            coverage = overall.coverage,
            "Automated tests finished"
        );
        self.test_results.insert(selection, summary.clone());
        Ok(summary)
    }

    pub fn last_test_run(&self, selection: SuiteSelection) -> Option<TestRunSummary> {
        self.test_results.get(&selection).map(|r| r.clone())
    }

    // --- LIFECYCLE ---

    /// Ends every active session and flushes the audit trail.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), QualisError> {
        let ended = self.registry.clear();
        if ended > 0 {
            warn!(ended, "Active validations ended at shutdown");
        }
        if self.config.features.enable_audit_trail {
            self.audit.flush().await?;
        }
        info!("QA service shut down");
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
