// qualis-core/src/infrastructure/adapters/audit.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

use crate::error::QualisError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{read_json_array, write_json_atomic};
use crate::ports::audit::{AuditRecord, AuditSink};

#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        lock(&self.records).clone()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    fn append(&self, record: AuditRecord) {
        lock(&self.records).push(record);
    }

    fn len(&self) -> usize {
        lock(&self.records).len()
    }

    async fn flush(&self) -> Result<(), QualisError> {
        Ok(())
    }
}

/// Buffers records in memory. `flush` appends the records not yet written to
/// the JSON array already on disk, so earlier runs keep their entries.
#[derive(Debug)]
pub struct JsonFileAuditSink {
    path: PathBuf,
    records: Mutex<Vec<AuditRecord>>,
    flushed: AtomicUsize,
    flush_lock: tokio::sync::Mutex<()>,
}

impl JsonFileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Mutex::new(Vec::new()),
            flushed: AtomicUsize::new(0),
            flush_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditSink for JsonFileAuditSink {
    fn append(&self, record: AuditRecord) {
        lock(&self.records).push(record);
    }

    fn len(&self) -> usize {
        lock(&self.records).len()
    }

    #[instrument(skip(self))]
    async fn flush(&self) -> Result<(), QualisError> {
        let _serial = self.flush_lock.lock().await;
        let flushed = self.flushed.load(Ordering::Acquire);
        let pending: Vec<AuditRecord> = lock(&self.records)[flushed..].to_vec();
        if pending.is_empty() && self.path.exists() {
            return Ok(());
        }

        let path = self.path.clone();
        let count = pending.len();
        let total = tokio::task::spawn_blocking(move || -> Result<usize, InfrastructureError> {
            let mut trail = read_json_array(&path)?;
            for record in &pending {
                trail.push(serde_json::to_value(record)?);
            }
            write_json_atomic(&path, &trail)?;
            Ok(trail.len())
        })
        .await
        .map_err(|e| QualisError::InternalError(format!("audit flush task failed: {}", e)))??;

        self.flushed.store(flushed + count, Ordering::Release);
        debug!(path = ?self.path, appended = count, entries = total, "Audit trail flushed");
        Ok(())
    }
}

fn lock(records: &Mutex<Vec<AuditRecord>>) -> MutexGuard<'_, Vec<AuditRecord>> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::{Category, ValidationResult};
    use chrono::Utc;
    use tempfile::tempdir;

    fn record(category: Category) -> AuditRecord {
        AuditRecord::for_result(&ValidationResult {
            session_id: "validation_0_audit".into(),
            timestamp: Utc::now(),
            category,
            passed: true,
            score: 1.0,
            details: Default::default(),
            issues: vec![],
            processing_time_ms: 3,
            metadata: Default::default(),
        })
    }

    #[tokio::test]
    async fn test_memory_sink_counts() {
        let sink = MemoryAuditSink::new();
        assert!(sink.is_empty());
        sink.append(record(Category::DataQuality));
        sink.append(record(Category::ReportQuality));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records()[1].action, "report_quality_validation");
        sink.flush().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_sink_writes_whole_trail() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let sink = JsonFileAuditSink::new(dir.path().join("target").join("audit_trail.json"));

        sink.append(record(Category::DataQuality));
        sink.flush().await?;
        sink.append(record(Category::AnalysisQuality));
        sink.flush().await?;

        let content = std::fs::read_to_string(sink.path())?;
        let trail: serde_json::Value = serde_json::from_str(&content)?;
        let entries = trail.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["action"], "data_quality_validation");
        assert_eq!(entries[1]["result"]["category"], "analysis_quality");
        Ok(())
    }

    #[tokio::test]
    async fn test_file_sinks_append_to_existing_trail() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("audit_trail.json");

        let first = JsonFileAuditSink::new(&path);
        first.append(record(Category::ReportQuality));
        first.flush().await?;

        let second = JsonFileAuditSink::new(&path);
        second.append(record(Category::DataQuality));
        second.flush().await?;
        second.flush().await?;

        let trail: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        let entries = trail.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["action"], "report_quality_validation");
        assert_eq!(entries[1]["action"], "data_quality_validation");
        Ok(())
    }

    #[tokio::test]
    async fn test_file_sink_rejects_corrupt_trail() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("audit_trail.json");
        std::fs::write(&path, "not json")?;

        let sink = JsonFileAuditSink::new(&path);
        sink.append(record(Category::DataQuality));
        assert!(sink.flush().await.is_err());
        assert_eq!(std::fs::read_to_string(&path)?, "not json");
        Ok(())
    }
}
