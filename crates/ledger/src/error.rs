//! The module contains the errors the ledger can throw.
//!
//! The errors are:
//!
//! - [`ValidationError`] thrown when user input fails the name/amount rules.
//! - [`StoreError`] thrown when the backing store cannot load or save.

use thiserror::Error;

/// Rejections for user-supplied expense input. Nothing changes when one of
/// these is returned.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Expense name is empty!")]
    EmptyName,
    #[error("Expense amount is empty!")]
    EmptyAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Failures at the persistence boundary. Never fatal: a failed load starts
/// the ledger empty, a failed save leaves the in-memory state ahead of the
/// persisted blob.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Serialize(#[from] serde_json::Error),
}
