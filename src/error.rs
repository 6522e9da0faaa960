//! Error types surfaced by the engine.

use thiserror::Error;

/// A business rule rejected a record or a report request.
///
/// These are terminal: the caller has to fix its input and try again.
/// Only the first failing rule is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    #[error("invalid date: {0}")]
    InvalidDate(&'static str),

    #[error("invalid range: {0}")]
    InvalidRange(&'static str),
}

impl ValidationError {
    /// Short machine readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidAmount(_) => "invalid_amount",
            ValidationError::InvalidDate(_) => "invalid_date",
            ValidationError::InvalidRange(_) => "invalid_range",
        }
    }
}

/// Failure of a [`crate::service::GasofilacoService`] operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("repository error: {0}")]
    Repository(anyhow::Error),

    #[error("report task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
