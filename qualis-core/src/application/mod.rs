// qualis-core/src/application/mod.rs

pub mod checkers;
pub mod recorder;
pub mod registry;
pub mod service;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs `use qualis_core::application::{QualityAssurance, CheckerRegistry};`

pub use checkers::CheckerRegistry;
pub use recorder::ResultRecorder;
pub use registry::{SessionGuard, SessionRegistry};
pub use service::QualityAssurance;
