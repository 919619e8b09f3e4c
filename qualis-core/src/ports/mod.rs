// qualis-core/src/ports/mod.rs

// Contracts the service depends on, without knowing who implements them.

pub mod audit;
pub mod checker;
pub mod suite;

pub use audit::{AuditRecord, AuditSink};
pub use checker::FactorChecker;
pub use suite::TestSuite;
