//! # Store Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  serde_json::Error ──► StoreError::Serialization                      │
//! │  sqlx::Error       ──► StoreError::{ConnectionFailed, QueryFailed}    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (reprice-engine) ── what the embedding UI sees            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document failed to encode or decode.
    ///
    /// Treated as fatal for the operation: serialization happens before
    /// the backend write, so a failure leaves the stored state untouched.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend could not be reached or opened.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Connection pool timed out or closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A backend read or write failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut  → StoreError::ConnectionFailed
/// sqlx::Error::PoolClosed    → StoreError::ConnectionFailed
/// Other                      → StoreError::QueryFailed
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::ConnectionFailed("connection pool timed out".to_string())
            }
            sqlx::Error::PoolClosed => {
                StoreError::ConnectionFailed("connection pool is closed".to_string())
            }
            other => StoreError::QueryFailed(other.to_string()),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
