// qualis-core/src/domain/quality/stats.rs

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::quality::{Category, IssueSeverity, ValidationResult};

/// Running counters over every finalized validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityStats {
    pub total_validations: u64,
    pub passed_validations: u64,
    pub failed_validations: u64,
    /// Calls that ended in an error; they never count as passed or failed.
    pub errored_validations: u64,
    pub last_scores: BTreeMap<Category, f64>,
    pub overall_quality_score: f64,
    pub critical_issues: u64,
    pub warning_issues: u64,
    pub info_issues: u64,
}

impl QualityStats {
    pub fn last_score(&self, category: Category) -> Option<f64> {
        self.last_scores.get(&category).copied()
    }

    /// Folds a finished result into the counters. Returns `true` when the
    /// result failed, i.e. when its issues belong in the cumulative log.
    pub fn absorb(&mut self, result: &ValidationResult) -> bool {
        self.total_validations += 1;
        let failed = !result.passed;
        if failed {
            self.failed_validations += 1;
            for issue in &result.issues {
                match issue.severity {
                    IssueSeverity::Critical => self.critical_issues += 1,
                    IssueSeverity::Warning => self.warning_issues += 1,
                    IssueSeverity::Info => self.info_issues += 1,
                }
            }
        } else {
            self.passed_validations += 1;
        }

        self.last_scores.insert(result.category, result.score);
        self.overall_quality_score = self.rollup();
        failed
    }

    /// Mean of the latest data and analysis scores. Report quality is not
    /// part of this rollup; a category never seen counts as 0.0.
    fn rollup(&self) -> f64 {
        let data = self.last_score(Category::DataQuality).unwrap_or(0.0);
        let analysis = self.last_score(Category::AnalysisQuality).unwrap_or(0.0);
        (data + analysis) / 2.0
    }
}
