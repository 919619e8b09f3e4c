// qualis-core/src/domain/quality/thresholds.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::quality::Category;

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(default)]
pub struct QualityThresholds {
    #[validate(range(min = 0.0, max = 1.0))]
    pub data_completeness: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub data_accuracy: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub analysis_reliability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub report_consistency: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub performance_accuracy: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            data_completeness: 0.95,
            data_accuracy: 0.98,
            analysis_reliability: 0.99,
            report_consistency: 0.97,
            performance_accuracy: 0.95,
        }
    }
}

impl QualityThresholds {
    /// Minimum aggregate score for a validation of `category` to pass.
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::DataQuality => self.data_accuracy,
            Category::AnalysisQuality => self.analysis_reliability,
            Category::ReportQuality => self.report_consistency,
        }
    }
}
