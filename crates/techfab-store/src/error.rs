//! # Store Error Types
//!
//! Error types for the state store and its collaborator seams.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (techfab-core)            io::Error / serde_json::Error     │
//! │       │                                        │                        │
//! │       └──────────────┬─────────────────────────┘                        │
//! │                      ▼                                                  │
//! │                 StoreError (this module)                                │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │        UI displays a user-friendly message                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use techfab_core::CoreError;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A lifecycle or validation rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The imported payload is not a recognizable backup.
    ///
    /// ## When This Occurs
    /// The minimal shape check failed: the payload is missing `documents`,
    /// `customers` (as arrays) or `settings`. The current state is left
    /// untouched.
    #[error("Invalid backup file format")]
    InvalidBackup,

    /// Reading or writing the persisted snapshot failed.
    #[error("Persistence failed: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot or backup payload could not be (de)serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The admin gate rejected the supplied password.
    #[error("Access denied")]
    AccessDenied,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
