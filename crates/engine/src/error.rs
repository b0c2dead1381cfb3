//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidAmount`] thrown when an expense amount is not a finite number > 0.
//! - [`InvalidDescription`] thrown when an expense has an empty description.
//! - [`InvalidPayer`] thrown when an expense has no payer.
//! - [`Storage`] thrown when the backing [`ExpenseStore`] fails.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDescription`]: EngineError::InvalidDescription
//!  [`InvalidPayer`]: EngineError::InvalidPayer
//!  [`Storage`]: EngineError::Storage
//!  [`ExpenseStore`]: super::store::ExpenseStore
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid description: {0}")]
    InvalidDescription(String),
    #[error("Invalid payer: {0}")]
    InvalidPayer(String),
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl EngineError {
    /// `true` when the error comes from rejected input rather than from the
    /// engine itself.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InvalidDescription(_) | Self::InvalidPayer(_)
        )
    }
}
