// qualis-core/src/domain/quality/mod.rs

pub mod category;
pub mod check;
pub mod report;
pub mod result;
pub mod stats;
pub mod thresholds;
pub mod utils;
pub mod weights;

// Re-exports
pub use category::Category;
pub use check::{CheckResult, Issue, IssueSeverity};
pub use report::{QualityMetricsReport, QualitySummary, QualityTrend};
pub use result::{Metadata, ValidationResult};
pub use stats::QualityStats;
pub use thresholds::QualityThresholds;
pub use weights::{WeightError, WeightTable};
