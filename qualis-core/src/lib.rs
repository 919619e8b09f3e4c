// qualis-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for injected strategies: factor checkers, audit sinks, test suites.
pub mod ports;

// 2. Domain
// Categories, weight tables, check results, session lifecycle, statistics.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// Config files, audit sinks, built-in checkers and suites.
pub mod infrastructure;

// 4. Application (Use Cases)
// Session registry, result recorder, the QualityAssurance service.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::QualityAssurance;
pub use domain::quality::{Category, CheckResult, Issue, IssueSeverity, ValidationResult, WeightTable};
pub use error::QualisError;
