// qualis-core/src/application/recorder.rs

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::domain::quality::{Category, Issue, QualityStats, QualityTrend, ValidationResult};

const HISTORY_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct RecorderState {
    stats: QualityStats,
    issues: Vec<Issue>,
    overall_history: VecDeque<f64>,
}

/// Running counters and the cumulative issue log. Every update happens under
/// one lock, so concurrent records never lose an increment.
#[derive(Debug, Default)]
pub struct ResultRecorder {
    state: Mutex<RecorderState>,
}

impl ResultRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RecorderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, result: &ValidationResult) {
        let mut state = self.lock();
        if state.stats.absorb(result) {
            state.issues.extend(result.issues.iter().cloned());
        }

        let overall = state.stats.overall_quality_score;
        if state.overall_history.len() == HISTORY_CAPACITY {
            state.overall_history.pop_front();
        }
        state.overall_history.push_back(overall);

        debug!(
            session_id = %result.session_id,
            category = %result.category,
            passed = result.passed,
            overall,
            "Result recorded"
        );
    }

    /// Counts a call that ended in an error. Pass and fail counters are untouched.
    pub fn record_error(&self, category: Category) {
        let mut state = self.lock();
        state.stats.errored_validations += 1;
        warn!(%category, errored = state.stats.errored_validations, "Validation errored");
    }

    pub fn stats(&self) -> QualityStats {
        self.lock().stats.clone()
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.lock().issues.clone()
    }

    pub fn issue_count(&self) -> usize {
        self.lock().issues.len()
    }

    pub fn trend(&self) -> QualityTrend {
        let mut state = self.lock();
        QualityTrend::from_history(state.overall_history.make_contiguous())
    }
}
