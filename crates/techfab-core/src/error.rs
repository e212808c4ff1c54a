//! # Error Types
//!
//! Domain-specific error types for techfab-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  techfab-core errors (this file)                                       │
//! │  ├── CoreError        - Lifecycle / domain errors                      │
//! │  └── ValidationError  - Row-level input validation failures            │
//! │                                                                         │
//! │  techfab-store errors (separate crate)                                 │
//! │  └── StoreError       - Persistence / backup / gate failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (row number, document number, etc.)
//! 3. Errors are enum variants, never String
//! 4. A validation failure rejects the whole operation - no partial saves

use thiserror::Error;

use crate::types::DocType;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent lifecycle rule violations. They should be caught
/// and translated to user-friendly messages by the UI shell.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Document cannot be found.
    ///
    /// ## When This Occurs
    /// Only operations that must produce a value (conversion) raise this.
    /// Flag-toggling operations on an unknown id are deliberate no-ops
    /// instead, matching how the product has always behaved.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// The requested conversion is not part of the workflow funnel.
    ///
    /// ## When This Occurs
    /// Allowed chains are Quotation→{Pro-Forma, Delivery Order},
    /// Pro-Forma→{Delivery Order, Invoice}, Delivery Order→Invoice.
    /// Anything else (e.g. Quotation→Invoice directly, or converting an
    /// Invoice at all) is rejected.
    #[error("Cannot convert {from} to {to}")]
    ConversionNotAllowed { from: DocType, to: DocType },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any state mutation; the operation is rejected entirely.
/// Item-level variants carry the 1-indexed row so the form can highlight
/// the offending line.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No customer selected for the document.
    #[error("customer is required")]
    CustomerRequired,

    /// The document has no line items.
    #[error("at least one item is required")]
    NoItems,

    /// A line item has an empty description.
    #[error("item {row}: description is required")]
    DescriptionRequired { row: usize },

    /// A line item quantity is below 1.
    #[error("item {row}: quantity must be at least 1")]
    QuantityTooSmall { row: usize },

    /// A line item unit price is below 0.01.
    #[error("item {row}: unit price must be at least 0.01")]
    UnitPriceTooSmall { row: usize },
}

impl ValidationError {
    /// Returns the 1-indexed row for item-level failures, `None` for
    /// document-level ones.
    pub fn row(&self) -> Option<usize> {
        match self {
            ValidationError::DescriptionRequired { row }
            | ValidationError::QuantityTooSmall { row }
            | ValidationError::UnitPriceTooSmall { row } => Some(*row),
            _ => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
