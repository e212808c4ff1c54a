//! # Domain Types
//!
//! Core domain types used throughout Techfab Billing.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Document     │   │    Customer     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  number (QT-…)  │   │  name           │   │  name           │       │
//! │  │  items[]        │   │  tin / brn      │   │  price          │       │
//! │  │  status         │   │  address        │   │  taxRate?       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    DocType      │   │    DocStatus    │   │ CompanySettings │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Quotation "QT" │   │  Draft          │   │  singleton      │       │
//! │  │  Proforma  "PI" │   │  Sent / Paid    │   │  sstRate        │       │
//! │  │  Delivery  "DO" │   │  Converted      │   │  bank details   │       │
//! │  │  Invoice   "INV"│   │  Cancelled      │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  AppState = { documents, customers, products, settings } - the whole   │
//! │  aggregate is one persistence unit; there is no per-entity storage.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names serialize camelCase and enums serialize to their historical
//! strings (`"QT"`, `"Draft"`, …) so snapshots written by earlier releases
//! keep loading. `products` and `lastBackupDate` may be absent on old
//! snapshots and default in.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::SST_RATE;

// =============================================================================
// Document Type
// =============================================================================

/// The four kinds of sales document, ordered along the conversion funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DocType {
    /// Quotation - the opening offer ("QT" on the wire).
    #[serde(rename = "QT")]
    Quotation,
    /// Pro-forma invoice ("PI" on the wire).
    #[serde(rename = "PI")]
    Proforma,
    /// Delivery order ("DO" on the wire).
    #[serde(rename = "DO")]
    DeliveryOrder,
    /// Tax invoice - the end of the chain ("INV" on the wire).
    #[serde(rename = "INV")]
    Invoice,
}

impl DocType {
    /// The prefix used in document numbers (`QT-2025-0001`).
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        match self {
            DocType::Quotation => "QT",
            DocType::Proforma => "PI",
            DocType::DeliveryOrder => "DO",
            DocType::Invoice => "INV",
        }
    }

    /// Human-readable document title as printed on paper.
    pub const fn label(&self) -> &'static str {
        match self {
            DocType::Quotation => "Quotation",
            DocType::Proforma => "Pro Forma Invoice",
            DocType::DeliveryOrder => "Delivery Order",
            DocType::Invoice => "Invoice",
        }
    }

    /// Conversion targets offered by the workflow.
    ///
    /// ## The Funnel
    /// ```text
    /// Quotation ──► Pro-Forma ──► Delivery Order ──► Invoice
    ///     │              │                              ▲
    ///     └──────────────┴──────────────────────────────┘ (via DO or PI)
    /// ```
    /// Quotation→Invoice directly is deliberately not offered; the sales
    /// flow always passes through an intermediate document.
    pub const fn conversion_targets(&self) -> &'static [DocType] {
        match self {
            DocType::Quotation => &[DocType::Proforma, DocType::DeliveryOrder],
            DocType::Proforma => &[DocType::DeliveryOrder, DocType::Invoice],
            DocType::DeliveryOrder => &[DocType::Invoice],
            DocType::Invoice => &[],
        }
    }

    /// Whether this type may be converted into `target`.
    pub fn can_convert_to(&self, target: DocType) -> bool {
        self.conversion_targets().contains(&target)
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Document Status
// =============================================================================

/// The status of a document.
///
/// Status changes are a free mutation (any value can replace any other);
/// the one structured transition is conversion, which flips the *source*
/// document to `Converted` as a side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DocStatus {
    /// Freshly created or re-opened ("mark unpaid" toggles Paid back here).
    Draft,
    /// Sent to the customer, awaiting payment.
    Sent,
    /// Settled.
    Paid,
    /// Superseded by a converted document; excluded from active dashboards.
    Converted,
    /// Abandoned.
    Cancelled,
}

impl Default for DocStatus {
    fn default() -> Self {
        DocStatus::Draft
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row on a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Row identifier (UUID v4).
    pub id: String,

    /// What is being billed. Required non-empty at save time.
    pub description: String,

    /// Quantity. Must be ≥ 1 at save time.
    pub quantity: f64,

    /// Price per unit. Must be ≥ 0.01 at save time.
    pub unit_price: f64,

    /// Tax rate as a fraction in [0, 1] (0.08 = 8%). Absent means untaxed.
    #[serde(default)]
    pub tax_rate: f64,
}

impl LineItem {
    /// Prefills a line from a catalog product.
    ///
    /// ## Price Freezing
    /// The copied fields are frozen at this moment. Editing the product
    /// later never retroactively changes lines that were prefilled from it.
    pub fn from_product(product: &Product, quantity: f64, default_tax_rate: f64) -> Self {
        LineItem {
            id: Uuid::new_v4().to_string(),
            description: product.name.clone(),
            quantity,
            unit_price: product.price,
            tax_rate: product.tax_rate.unwrap_or(default_tax_rate),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// A sales/fulfillment record.
///
/// ## Identity
/// - `id`: UUID v4, assigned at creation, immutable
/// - `number`: human-readable `{PREFIX}-{YEAR}-{SEQ}` code, assigned by the
///   numbering authority at creation but user-editable afterwards (edits are
///   not revalidated for uniqueness - longstanding product behavior)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Document kind. Immutable except via conversion, which creates a NEW
    /// document rather than mutating this one.
    #[serde(rename = "type")]
    pub doc_type: DocType,

    /// Soft-delete flag. Deleted documents stay in storage (recycle bin)
    /// but are excluded from listings, reports, and the numbering scan.
    #[serde(default)]
    pub is_deleted: bool,

    /// Sequence code, e.g. `QT-2025-0001`.
    pub number: String,

    /// Calendar date, ISO `YYYY-MM-DD`.
    pub date: String,

    /// Weak reference to a [`Customer`] by id. A dangling reference (the
    /// customer was hard-deleted) renders as "Unknown".
    pub customer_id: String,

    /// Billable rows. Order is display-relevant only; totals are
    /// order-independent.
    pub items: Vec<LineItem>,

    /// Current status.
    pub status: DocStatus,

    /// Flat currency amount subtracted from the pre-discount total.
    #[serde(default)]
    pub discount: f64,

    /// Free text. Conversion prepends a `Ref: {number}` backlink line here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Structured conversion lineage: the id of the document this one was
    /// converted from. The human-readable `Ref:` note is kept alongside for
    /// display compatibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_from_id: Option<String>,
}

// =============================================================================
// Customer
// =============================================================================

/// A billing customer.
///
/// Deletion is hard (no recycle bin) and does not cascade: documents keep
/// their stale `customerId` and resolve to the "Unknown" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    /// Contact person printed as "Attn:" on documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention_to: Option<String>,
    /// Tax identification number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tin: Option<String>,
    /// Business registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brn: Option<String>,
}

impl Customer {
    /// The placeholder returned when a document references a customer that
    /// no longer exists.
    pub fn unknown(id: &str) -> Self {
        Customer {
            id: id.to_string(),
            name: "Unknown".to_string(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            attention_to: None,
            tin: None,
            brn: None,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry used to prefill line items.
///
/// There is no live link: once a product is picked into a line item the
/// copied fields are frozen, and later product edits never touch existing
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Per-product tax rate override; falls back to the company SST rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
}

// =============================================================================
// Company Settings
// =============================================================================

/// Singleton company identity record - exactly one per application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    pub name: String,
    pub address: String,
    /// Company registration (SSM) number.
    pub ssm_number: String,
    /// SST registration number, printed on tax invoices when present.
    pub sst_reg_no: String,
    pub phone: String,
    pub email: String,
    pub bank_name: String,
    pub bank_account: String,
    /// Default tax rate offered when adding line items.
    pub sst_rate: f64,
    /// Logo image as embedded data (data-URL string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Signature image as embedded data (data-URL string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl Default for CompanySettings {
    fn default() -> Self {
        CompanySettings {
            name: String::new(),
            address: String::new(),
            ssm_number: String::new(),
            sst_reg_no: String::new(),
            phone: String::new(),
            email: String::new(),
            bank_name: String::new(),
            bank_account: String::new(),
            sst_rate: SST_RATE,
            logo: None,
            signature: None,
        }
    }
}

// =============================================================================
// App State
// =============================================================================

/// The aggregate root: everything the application persists, as one unit.
///
/// ## Ownership
/// AppState exclusively owns all documents, customers, products and the
/// settings singleton. The only cross-entity references are string-id
/// lookups (`customerId`), never ownership pointers. Every mutation replaces
/// the whole snapshot; there is no per-entity persistence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub documents: Vec<Document>,
    pub customers: Vec<Customer>,
    /// Absent on snapshots from releases that predate the product catalog.
    #[serde(default)]
    pub products: Vec<Product>,
    pub settings: CompanySettings,
    /// Stamped by backup export; absent until the first backup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_backup_date: Option<String>,
}

impl AppState {
    /// Looks a document up by id.
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Documents that are not soft-deleted (the default listing scope).
    pub fn active_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| !d.is_deleted)
    }

    /// Soft-deleted documents (the recycle bin).
    pub fn deleted_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| d.is_deleted)
    }
}

// =============================================================================
// Customer Directory
// =============================================================================

/// Keyed customer lookup built once per read pass.
///
/// Documents reference customers by string id; this directory resolves those
/// references in O(1) instead of scanning the customer list per document.
/// Dangling ids resolve to [`Customer::unknown`] - referential integrity is
/// deliberately NOT enforced.
pub struct CustomerDirectory<'a> {
    by_id: HashMap<&'a str, &'a Customer>,
}

impl<'a> CustomerDirectory<'a> {
    pub fn new(customers: &'a [Customer]) -> Self {
        CustomerDirectory {
            by_id: customers.iter().map(|c| (c.id.as_str(), c)).collect(),
        }
    }

    /// The customer for `id`, if it still exists.
    pub fn get(&self, id: &str) -> Option<&'a Customer> {
        self.by_id.get(id).copied()
    }

    /// The customer for `id`, or the "Unknown" placeholder.
    pub fn resolve(&self, id: &str) -> Customer {
        self.get(id).cloned().unwrap_or_else(|| Customer::unknown(id))
    }

    /// Display name for `id`, or `"Unknown"`.
    pub fn name_of(&self, id: &str) -> String {
        self.get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
