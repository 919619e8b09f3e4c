// qualis-core/src/domain/quality/result.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::domain::quality::{Category, CheckResult, Issue};

pub type Metadata = serde_json::Map<String, Value>;

/// Final outcome of one validation call. Built once by the service and
/// never mutated after it has been recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub category: Category,
    pub passed: bool,
    pub score: f64,
    pub details: BTreeMap<String, CheckResult>,
    pub issues: Vec<Issue>,
    pub processing_time_ms: u64,
    pub metadata: Metadata,
}

impl ValidationResult {
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Describes the validated subject for the result's metadata.
pub fn describe_subject(category: Category, subject: &Value) -> Metadata {
    let mut metadata = Metadata::new();
    match category {
        Category::DataQuality => {
            let record_count = subject.as_array().map_or(1, Vec::len);
            metadata.insert("data_size".into(), json!(serialized_len(subject)));
            metadata.insert("record_count".into(), json!(record_count));
        }
        Category::AnalysisQuality => {
            metadata.insert("analysis_type".into(), json!(type_tag(subject)));
            let data_points = subject
                .get("dataPoints")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            metadata.insert("data_points".into(), json!(data_points));
        }
        Category::ReportQuality => {
            metadata.insert("report_type".into(), json!(type_tag(subject)));
            metadata.insert("report_size".into(), json!(serialized_len(subject)));
        }
    }
    metadata.insert("validator".into(), json!(category.validator_name()));
    metadata
}

fn type_tag(subject: &Value) -> &str {
    subject
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}

fn serialized_len(subject: &Value) -> usize {
    // Display on Value writes compact JSON
    subject.to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_metadata_counts_records() {
        let subject = json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]);
        let meta = describe_subject(Category::DataQuality, &subject);
        assert_eq!(meta["record_count"], json!(3));
        assert_eq!(meta["data_size"], json!(subject.to_string().len()));
        assert_eq!(meta["validator"], json!("DataQualityValidator"));
    }

    #[test]
    fn test_single_object_counts_as_one_record() {
        let meta = describe_subject(Category::DataQuality, &json!({ "id": 1 }));
        assert_eq!(meta["record_count"], json!(1));
    }

    #[test]
    fn test_analysis_metadata_defaults() {
        let meta = describe_subject(Category::AnalysisQuality, &json!({}));
        assert_eq!(meta["analysis_type"], json!("unknown"));
        assert_eq!(meta["data_points"], json!(0));

        let meta = describe_subject(
            Category::AnalysisQuality,
            &json!({ "type": "regression", "dataPoints": 420 }),
        );
        assert_eq!(meta["analysis_type"], json!("regression"));
        assert_eq!(meta["data_points"], json!(420));
    }

    #[test]
    fn test_report_metadata() {
        let subject = json!({ "type": "session_summary", "sections": [] });
        let meta = describe_subject(Category::ReportQuality, &subject);
        assert_eq!(meta["report_type"], json!("session_summary"));
        assert_eq!(meta["validator"], json!("ReportQualityValidator"));
    }
}
