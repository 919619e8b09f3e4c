// qualis/src/commands/mod.rs

pub mod report;
pub mod test;
pub mod validate;
pub mod weights;

use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use qualis_core::application::{CheckerRegistry, QualityAssurance};
use qualis_core::infrastructure::adapters::{JsonFileAuditSink, baseline_suites};
use qualis_core::infrastructure::config::load_config;

/// Builds the service for a project directory: its configuration, the
/// baseline checkers and suites, and a file-backed audit trail.
pub(crate) fn bootstrap(project_dir: &Path) -> anyhow::Result<QualityAssurance> {
    let config = load_config(project_dir)
        .with_context(|| format!("Failed to load QA configuration from {:?}", project_dir))?;
    let audit_path = project_dir.join(&config.audit_path);
    let checkers = CheckerRegistry::baseline()?;
    debug!(project = %config.name, audit = ?audit_path, checkers = checkers.len(), "Service bootstrapped");

    Ok(QualityAssurance::new(config, checkers)
        .with_audit_sink(Arc::new(JsonFileAuditSink::new(audit_path)))
        .with_test_suites(baseline_suites()))
}

pub(crate) fn read_subject(path: &Path) -> anyhow::Result<Arc<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read subject at {:?}", path))?;
    let subject: Value = serde_json::from_str(&content)
        .with_context(|| format!("Subject at {:?} is not valid JSON", path))?;
    Ok(Arc::new(subject))
}
