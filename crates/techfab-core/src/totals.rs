//! # Financial Calculator
//!
//! Derives subtotal, tax, discount and grand total for a document.
//!
//! ## One Money Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EVERY consumer of a total calls compute_totals():                      │
//! │                                                                         │
//! │  List views ──┐                                                         │
//! │  Dashboard ───┼──► compute_totals(doc) ──► { subtotal, tax_total,      │
//! │  Tax report ──┤                              discount, grand_total }    │
//! │  Print payload┘                                                         │
//! │                                                                         │
//! │  An earlier release let the PDF path sum unrounded lines while list    │
//! │  views summed rounded ones; the two disagreed by cents. Totals are     │
//! │  computed HERE and nowhere else.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round_to;
use crate::types::Document;

/// The derived monetary figures for one document.
///
/// All four fields are already rounded; renderers must not re-derive them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Σ round(quantity × unitPrice) over all items.
    pub subtotal: f64,
    /// Σ round(quantity × unitPrice × taxRate) over all items.
    pub tax_total: f64,
    /// The flat discount, echoed from the document.
    pub discount: f64,
    /// max(0, round(subtotal + taxTotal − discount)).
    pub grand_total: f64,
}

/// Computes the totals for a document.
///
/// Each line amount is rounded individually BEFORE summation so the total
/// always equals the sum of the line amounts the user sees. The grand total
/// is clamped at zero: a discount larger than the document never produces a
/// negative amount payable.
///
/// ## Example
/// ```rust
/// use techfab_core::totals::compute_totals;
/// # use techfab_core::types::{DocStatus, DocType, Document, LineItem};
/// # let doc = Document {
/// #     id: "d1".into(), doc_type: DocType::Quotation, is_deleted: false,
/// #     number: "QT-2025-0001".into(), date: "2025-01-02".into(),
/// #     customer_id: "c1".into(),
/// #     items: vec![LineItem {
/// #         id: "i1".into(), description: "Work".into(),
/// #         quantity: 2.0, unit_price: 100.0, tax_rate: 0.08,
/// #     }],
/// #     status: DocStatus::Draft, discount: 0.0, notes: None,
/// #     converted_from_id: None,
/// # };
/// let totals = compute_totals(&doc);
/// assert_eq!(totals.subtotal, 200.0);
/// assert_eq!(totals.tax_total, 16.0);
/// assert_eq!(totals.grand_total, 216.0);
/// ```
pub fn compute_totals(doc: &Document) -> DocumentTotals {
    // The outer round_to re-quantizes the accumulated sum: summation of
    // cent-exact terms can still leave sub-cent representation noise, and
    // its size depends on item order.
    let subtotal: f64 = round_to(
        doc.items
            .iter()
            .map(|i| round_to(i.quantity * i.unit_price))
            .sum(),
    );

    let tax_total: f64 = round_to(
        doc.items
            .iter()
            .map(|i| round_to(i.quantity * i.unit_price * i.tax_rate))
            .sum(),
    );

    let grand_total = round_to(subtotal + tax_total - doc.discount).max(0.0);

    DocumentTotals {
        subtotal,
        tax_total,
        discount: doc.discount,
        grand_total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
