//! # Reporting
//!
//! Read-side views over [`AppState`]: dashboard aggregates, the monthly tax
//! summary, and the fully-resolved payload handed to the print collaborator.
//!
//! Everything here re-runs [`compute_totals`] per document - report views
//! never carry their own arithmetic.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::round_to;
use crate::totals::{compute_totals, DocumentTotals};
use crate::types::{AppState, CompanySettings, Customer, CustomerDirectory, DocStatus, DocType, Document};

// =============================================================================
// Monthly Tax Summary
// =============================================================================

/// One line of the monthly tax summary, as consumed by the report renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub date: String,
    pub number: String,
    pub customer_name: String,
    pub subtotal: f64,
    pub discount: f64,
    pub tax: f64,
    pub total: f64,
}

/// Builds the manual monthly tax summary: one row per non-deleted invoice
/// dated in the given month, sorted by date.
///
/// Customer names resolve through the directory; invoices whose customer was
/// hard-deleted show "Unknown".
pub fn monthly_summary(state: &AppState, year: i32, month: u32) -> Vec<SummaryRow> {
    let directory = CustomerDirectory::new(&state.customers);
    let month_prefix = format!("{:04}-{:02}-", year, month);

    let mut rows: Vec<SummaryRow> = state
        .active_documents()
        .filter(|d| d.doc_type == DocType::Invoice && d.date.starts_with(&month_prefix))
        .map(|d| {
            let totals = compute_totals(d);
            SummaryRow {
                date: d.date.clone(),
                number: d.number.clone(),
                customer_name: directory.name_of(&d.customer_id),
                subtotal: totals.subtotal,
                discount: totals.discount,
                tax: totals.tax_total,
                total: totals.grand_total,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.number.cmp(&b.number)));
    rows
}

// =============================================================================
// Dashboard
// =============================================================================

/// Aggregates for the dashboard cards.
///
/// "Active" means not soft-deleted and not `Converted` - converted documents
/// are history, not workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub quotation_count: usize,
    pub proforma_count: usize,
    pub delivery_order_count: usize,
    pub invoice_count: usize,
    /// Grand totals of all active invoices.
    pub invoiced_total: f64,
    /// Grand totals of active invoices still marked Sent.
    pub outstanding_total: f64,
    /// Grand totals of active invoices marked Paid.
    pub paid_total: f64,
}

/// Derives the dashboard aggregates from a snapshot.
pub fn dashboard_stats(state: &AppState) -> DashboardStats {
    let mut stats = DashboardStats {
        quotation_count: 0,
        proforma_count: 0,
        delivery_order_count: 0,
        invoice_count: 0,
        invoiced_total: 0.0,
        outstanding_total: 0.0,
        paid_total: 0.0,
    };

    for doc in state
        .active_documents()
        .filter(|d| d.status != DocStatus::Converted)
    {
        match doc.doc_type {
            DocType::Quotation => stats.quotation_count += 1,
            DocType::Proforma => stats.proforma_count += 1,
            DocType::DeliveryOrder => stats.delivery_order_count += 1,
            DocType::Invoice => stats.invoice_count += 1,
        }

        if doc.doc_type == DocType::Invoice {
            let grand_total = compute_totals(doc).grand_total;
            stats.invoiced_total += grand_total;
            match doc.status {
                DocStatus::Sent => stats.outstanding_total += grand_total,
                DocStatus::Paid => stats.paid_total += grand_total,
                _ => {}
            }
        }
    }

    stats.invoiced_total = round_to(stats.invoiced_total);
    stats.outstanding_total = round_to(stats.outstanding_total);
    stats.paid_total = round_to(stats.paid_total);
    stats
}

// =============================================================================
// Print Payload
// =============================================================================

/// Everything the print/render collaborator needs for one document, fully
/// resolved and with the totals already rounded - the renderer must not
/// re-derive any figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintPayload {
    pub document: Document,
    pub customer: Customer,
    pub settings: CompanySettings,
    pub totals: DocumentTotals,
}

/// Resolves the `(Document, Customer, CompanySettings)` triple for printing.
///
/// Returns `None` for an unknown id. A dangling customer reference resolves
/// to the "Unknown" placeholder rather than failing - the document still
/// prints.
pub fn print_payload(state: &AppState, id: &str) -> Option<PrintPayload> {
    let document = state.document(id)?.clone();
    let directory = CustomerDirectory::new(&state.customers);
    let customer = directory.resolve(&document.customer_id);
    let totals = compute_totals(&document);

    Some(PrintPayload {
        document,
        customer,
        settings: state.settings.clone(),
        totals,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
