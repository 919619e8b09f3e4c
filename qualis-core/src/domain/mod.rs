pub mod error;
pub mod project;
pub mod quality;
pub mod session;
pub mod testing;

// Re-exports to keep imports short elsewhere
pub use error::DomainError;
