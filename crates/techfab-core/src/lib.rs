//! # techfab-core: Pure Business Logic for Techfab Billing
//!
//! This crate is the **heart** of Techfab Billing. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Techfab Billing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (webview)                           │   │
//! │  │   Document Form ──► List Views ──► Dashboard ──► Tax Report    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots / mutation commands          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 techfab-store (State Store)                     │   │
//! │  │   owns the single AppState, persists it as one JSON blob        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ techfab-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌───────────┐ ┌───────┐ │   │
//! │  │  │  types  │ │  money  │ │ numbering │ │ lifecycle │ │ totals│ │   │
//! │  │  │Document │ │ round_to│ │ QT-2025-  │ │ create/   │ │ sub/  │ │   │
//! │  │  │Customer │ │ words   │ │   0001    │ │ convert   │ │ tax/  │ │   │
//! │  │  └─────────┘ └─────────┘ └───────────┘ └───────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO PERSISTENCE • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Document, Customer, Product, AppState, etc.)
//! - [`money`] - Rounding, currency formatting, amount-in-words
//! - [`numbering`] - Sequential document numbers per type per year
//! - [`totals`] - Subtotal / tax / discount / grand total derivation
//! - [`validation`] - Row-level document validation
//! - [`lifecycle`] - Document state machine as pure AppState transforms
//! - [`report`] - Dashboard, monthly tax summary, print payloads
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - the calendar date
//!    is an argument, never read from the system clock
//! 2. **No I/O**: Persistence, file system, network access is FORBIDDEN here
//! 3. **Copy-on-Write State**: Transforms take `&AppState` and build a new
//!    snapshot; the input is never mutated
//! 4. **One Money Path**: Every total anywhere is computed by
//!    [`totals::compute_totals`] - no consumer re-derives amounts
//!
//! ## Example Usage
//!
//! ```rust
//! use techfab_core::money::round_to;
//! use techfab_core::numbering::next_doc_number;
//! use techfab_core::types::DocType;
//!
//! // Rounding happens per line BEFORE summation
//! assert_eq!(round_to(0.1 + 0.2), 0.3);
//!
//! // First quotation of 2025
//! let number = next_doc_number(&[], DocType::Quotation, 2025);
//! assert_eq!(number, "QT-2025-0001");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lifecycle;
pub mod money;
pub mod numbering;
pub mod report;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use techfab_core::Document` instead of
// `use techfab_core::types::Document`

pub use error::{CoreError, CoreResult, ValidationError};
pub use totals::{compute_totals, DocumentTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default SST (sales and service tax) rate used when company settings are
/// first materialized.
///
/// ## Why a constant?
/// The rate is configurable per company in [`types::CompanySettings`]; this
/// is only the factory value for a fresh installation.
pub const SST_RATE: f64 = 0.08;

/// Width of the sequence segment in document numbers (`QT-2025-0001`).
pub const SEQ_WIDTH: usize = 4;
