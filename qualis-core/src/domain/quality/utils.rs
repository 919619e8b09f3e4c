// qualis-core/src/domain/quality/utils.rs
//
// Ad-hoc scoring helpers. Unlike `WeightTable::aggregate` these are lenient:
// a metric without a weight simply contributes nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::quality::{CheckResult, Issue};

pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.95;

const REPORT_WEIGHTS: [(&str, f64); 3] = [("accuracy", 0.4), ("completeness", 0.3), ("consistency", 0.3)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickQualityReport {
    pub overall: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub timestamp: DateTime<Utc>,
}

pub fn weighted_score_lenient(metrics: &BTreeMap<String, f64>, weights: &BTreeMap<String, f64>) -> f64 {
    metrics
        .iter()
        .map(|(key, value)| value * weights.get(key).copied().unwrap_or(0.0))
        .sum()
}

/// Accuracy 40%, completeness 30%, consistency 30%.
pub fn quality_report(metrics: &BTreeMap<String, f64>) -> QuickQualityReport {
    let weights: BTreeMap<String, f64> = REPORT_WEIGHTS
        .iter()
        .map(|(k, w)| (k.to_string(), *w))
        .collect();
    QuickQualityReport {
        overall: weighted_score_lenient(metrics, &weights),
        breakdown: metrics.clone(),
        timestamp: Utc::now(),
    }
}

pub fn is_quality_acceptable(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// Flattens the issues of several check results, keeping their order.
pub fn collect_issues<'a, I>(results: I) -> Vec<Issue>
where
    I: IntoIterator<Item = &'a CheckResult>,
{
    results
        .into_iter()
        .flat_map(|r| r.issues().iter().cloned())
        .collect()
}
