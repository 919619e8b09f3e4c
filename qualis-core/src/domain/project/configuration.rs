// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::domain::quality::{Category, QualityThresholds};
use crate::domain::testing::TestSuiteKind;

/// Feature switches of the QA service. Everything is on unless a config file
/// says otherwise.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FeatureFlags {
    pub enable_data_quality_checks: bool,
    pub enable_analysis_verification: bool,
    pub enable_report_validation: bool,
    pub enable_automated_testing: bool,
    pub enable_quality_metrics: bool,
    pub enable_audit_trail: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_data_quality_checks: true,
            enable_analysis_verification: true,
            enable_report_validation: true,
            enable_automated_testing: true,
            enable_quality_metrics: true,
            enable_audit_trail: true,
        }
    }
}

impl FeatureFlags {
    pub fn category_enabled(&self, category: Category) -> bool {
        match category {
            Category::DataQuality => self.enable_data_quality_checks,
            Category::AnalysisQuality => self.enable_analysis_verification,
            Category::ReportQuality => self.enable_report_validation,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TestingFramework {
    pub unit_tests: bool,
    pub integration_tests: bool,
    pub regression_tests: bool,
    pub performance_tests: bool,
}

impl Default for TestingFramework {
    fn default() -> Self {
        Self {
            unit_tests: true,
            integration_tests: true,
            regression_tests: true,
            performance_tests: true,
        }
    }
}

impl TestingFramework {
    /// Security suites have no switch and always run.
    pub fn enabled(&self, kind: TestSuiteKind) -> bool {
        match kind {
            TestSuiteKind::Unit => self.unit_tests,
            TestSuiteKind::Integration => self.integration_tests,
            TestSuiteKind::Regression => self.regression_tests,
            TestSuiteKind::Performance => self.performance_tests,
            TestSuiteKind::Security => true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Validate)]
pub struct QualisConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(flatten)]
    pub features: FeatureFlags,

    #[serde(default)]
    #[validate(nested)]
    pub quality_thresholds: QualityThresholds,

    #[serde(default)]
    pub testing_framework: TestingFramework,

    #[serde(default = "default_factor_timeout_ms")]
    #[validate(range(min = 1))]
    pub factor_timeout_ms: u64,

    #[serde(default = "default_audit_path")]
    pub audit_path: String,

    #[serde(rename = "config-paths", default)]
    pub config_paths: Vec<String>,
}

impl Default for QualisConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            features: FeatureFlags::default(),
            quality_thresholds: QualityThresholds::default(),
            testing_framework: TestingFramework::default(),
            factor_timeout_ms: default_factor_timeout_ms(),
            audit_path: default_audit_path(),
            config_paths: Vec::new(),
        }
    }
}

impl QualisConfig {
    pub fn category_enabled(&self, category: Category) -> bool {
        self.features.category_enabled(category)
    }

    pub fn factor_timeout(&self) -> Duration {
        Duration::from_millis(self.factor_timeout_ms)
    }
}

fn default_name() -> String {
    "qualis".to_string()
}
fn default_factor_timeout_ms() -> u64 {
    5000
}
fn default_audit_path() -> String {
    "target/audit_trail.json".to_string()
}
