// qualis-core/src/infrastructure/adapters/mod.rs

pub mod audit;
pub mod checkers;
pub mod suites;

pub use audit::{JsonFileAuditSink, MemoryAuditSink};
pub use checkers::{FnChecker, StaticChecker, baseline_checkers};
pub use suites::{StaticTestSuite, baseline_suites};
