// qualis-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QualisError {
    // --- DOMAIN (factors, sessions, categories) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (IO, config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for QualisError {
    fn from(err: std::io::Error) -> Self {
        QualisError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl QualisError {
    /// The domain error behind this failure, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            QualisError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
