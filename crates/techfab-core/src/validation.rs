//! # Validation Module
//!
//! Document validation rules, applied before any state mutation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript form)                                   │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (the authoritative check)                        │
//! │  ├── Runs inside create/update, before the new snapshot is built       │
//! │  └── A failure rejects the WHOLE operation - no partial save           │
//! │                                                                         │
//! │  There is no layer 3: the persisted blob has no schema of its own.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item-level failures carry the 1-indexed row so the form can point at the
//! offending line.

use crate::error::{ValidationError, ValidationResult};
use crate::types::LineItem;

/// Smallest unit price a line item may carry.
pub const MIN_UNIT_PRICE: f64 = 0.01;

/// Validates the savable parts of a document: customer reference and items.
///
/// ## Rules
/// - `customer_id` must be non-empty
/// - at least one line item
/// - per item: non-empty description, quantity ≥ 1, unit price ≥ 0.01
///
/// Rows are reported 1-indexed, matching what the user sees on the form.
///
/// ## Example
/// ```rust
/// use techfab_core::validation::validate_document_fields;
/// use techfab_core::types::LineItem;
///
/// let items = vec![LineItem {
///     id: "i1".into(),
///     description: "Steel bracket".into(),
///     quantity: 4.0,
///     unit_price: 12.5,
///     tax_rate: 0.0,
/// }];
/// assert!(validate_document_fields("c1", &items).is_ok());
/// assert!(validate_document_fields("", &items).is_err());
/// ```
pub fn validate_document_fields(customer_id: &str, items: &[LineItem]) -> ValidationResult<()> {
    if customer_id.trim().is_empty() {
        return Err(ValidationError::CustomerRequired);
    }

    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    for (idx, item) in items.iter().enumerate() {
        let row = idx + 1;

        if item.description.trim().is_empty() {
            return Err(ValidationError::DescriptionRequired { row });
        }

        if item.quantity < 1.0 {
            return Err(ValidationError::QuantityTooSmall { row });
        }

        if item.unit_price < MIN_UNIT_PRICE {
            return Err(ValidationError::UnitPriceTooSmall { row });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
