use thiserror::Error;

/// Failures surfaced to store callers.
///
/// Storage and decoding problems are recovered inside the stores and never show up here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Movie with ID {id} not found")]
    NotFound { id: String },
    #[error("Invalid movie: {0}")]
    Invalid(String),
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
