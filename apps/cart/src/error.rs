//! # Cart Error Type
//!
//! Unified error type for cart operations and commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Cart                               │
//! │                                                                         │
//! │  CoreError::ItemNotFound ────────────► CartError::ItemNotFound          │
//! │  CoreError::{Validation, ..} ────────► CartError::Rule                  │
//! │  StoreError ─────────────────────────► CartError::Storage               │
//! │  serde_json failure on load ─────────► CartError::CorruptRecord         │
//! │  use_cart() outside a scope ─────────► CartError::OutsideProvider       │
//! │  bad CLI arguments ──────────────────► CartError::Usage                 │
//! │  bad cart.toml / env ────────────────► CartError::Config                │
//! │                                                                         │
//! │  Every CartError has an ErrorCode; ErrorResponse { code, message }      │
//! │  is what the UI (or the CLI) prints.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use marketplace_core::CoreError;
use marketplace_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// `increment` / `decrement` for an id that is not in the cart.
    #[error("Item not found in cart: {0}")]
    ItemNotFound(String),

    /// A cart rule rejected the operation (bad descriptor, overflow).
    #[error("Invalid cart operation: {0}")]
    Rule(CoreError),

    /// Reading or writing the persisted record failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The persisted record exists but cannot be decoded.
    #[error("Persisted cart record is corrupt: {reason}")]
    CorruptRecord { reason: String },

    /// `use_cart()` was called outside any `CartProvider` scope.
    #[error("use_cart must be used within a CartProvider scope")]
    OutsideProvider,

    /// Command line could not be understood.
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for CartError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ItemNotFound(id) => CartError::ItemNotFound(id),
            other => CartError::Rule(other),
        }
    }
}

impl CartError {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        CartError::CorruptRecord {
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CartError::Config(message.into())
    }

    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::ItemNotFound(_) => ErrorCode::NotFound,
            CartError::Rule(_) | CartError::Usage(_) => ErrorCode::ValidationError,
            CartError::Storage(_) => ErrorCode::StorageError,
            CartError::CorruptRecord { .. } => ErrorCode::CorruptRecord,
            CartError::OutsideProvider => ErrorCode::ContextMisuse,
            CartError::Config(_) => ErrorCode::ConfigError,
            CartError::Internal(_) => ErrorCode::Internal,
        }
    }
}

/// Error codes for UI / CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    StorageError,
    CorruptRecord,
    ContextMisuse,
    ConfigError,
    Internal,
}

/// Serialized error returned to the UI.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Item not found in cart: a" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&CartError> for ErrorResponse {
    fn from(err: &CartError) -> Self {
        let message = match err {
            CartError::Storage(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Cart storage failed: {}", e);
                "Could not access cart storage on this device".to_string()
            }
            CartError::Internal(e) => {
                tracing::error!("Internal cart error: {}", e);
                "Cart operation failed".to_string()
            }
            other => other.to_string(),
        };

        ErrorResponse {
            code: err.code(),
            message,
        }
    }
}

/// Result type for cart operations.
pub type CartResult<T> = Result<T, CartError>;
