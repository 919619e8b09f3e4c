// qualis-core/src/domain/quality/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

/// Validation category. Each one owns a fixed weight table and a pass threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DataQuality,
    AnalysisQuality,
    ReportQuality,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::DataQuality,
        Category::AnalysisQuality,
        Category::ReportQuality,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataQuality => "data_quality",
            Self::AnalysisQuality => "analysis_quality",
            Self::ReportQuality => "report_quality",
        }
    }

    /// Name reported in result metadata.
    pub fn validator_name(&self) -> &'static str {
        match self {
            Self::DataQuality => "DataQualityValidator",
            Self::AnalysisQuality => "AnalysisQualityValidator",
            Self::ReportQuality => "ReportQualityValidator",
        }
    }

    /// Audit action recorded for a finished validation.
    pub fn audit_action(&self) -> String {
        format!("{}_validation", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "data_quality" | "data" => Ok(Self::DataQuality),
            "analysis_quality" | "analysis" => Ok(Self::AnalysisQuality),
            "report_quality" | "report" => Ok(Self::ReportQuality),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}
