// qualis-core/src/domain/quality/report.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::project::FeatureFlags;
use crate::domain::quality::{Category, Issue, QualityStats, QualityThresholds};

/// Direction of the overall score across the two latest recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTrend {
    Improving,
    Stable,
    Declining,
    Unknown,
}

impl QualityTrend {
    const EPSILON: f64 = 1e-9;

    /// Compares the last two points of an overall-score history.
    pub fn from_history(history: &[f64]) -> Self {
        match history {
            [.., previous, latest] => {
                let delta = latest - previous;
                if delta > Self::EPSILON {
                    Self::Improving
                } else if delta < -Self::EPSILON {
                    Self::Declining
                } else {
                    Self::Stable
                }
            }
            _ => Self::Unknown,
        }
    }
}

/// Read-only rollup returned by `QualityAssurance::summary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualitySummary {
    #[serde(flatten)]
    pub stats: QualityStats,
    pub active_validations: usize,
    pub total_issues: usize,
    pub audit_trail_entries: usize,
    pub quality_thresholds: QualityThresholds,
    pub features: FeatureFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityMetricsReport {
    pub timestamp: DateTime<Utc>,
    pub last_scores: BTreeMap<Category, f64>,
    pub trend: QualityTrend,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub overall_score: f64,
    pub generator: &'static str,
    pub version: &'static str,
}

/// Suggestions derived from the counters: one per recorded category whose
/// last score sits below its threshold, plus one for outstanding critical issues.
pub fn recommendations(stats: &QualityStats, thresholds: &QualityThresholds) -> Vec<String> {
    let mut out = Vec::new();
    for (category, score) in &stats.last_scores {
        let threshold = thresholds.for_category(*category);
        if *score < threshold {
            out.push(format!(
                "Raise {} from {:.4} to at least {:.4}",
                category, score, threshold
            ));
        }
    }
    if stats.critical_issues > 0 {
        out.push(format!(
            "Resolve {} critical issue(s) reported by failed validations",
            stats.critical_issues
        ));
    }
    out
}
