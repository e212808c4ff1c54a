//! # Backup Payloads & File Naming
//!
//! Parsing and naming for the export/import collaborator. The actual
//! export/import commands live on [`BillingStore`](crate::BillingStore);
//! this module owns the payload shape check and the naming conventions.
//!
//! ## Round-Trip Contract
//! ```text
//! import(export(state)) == state,  field for field,
//! provided the payload passes the minimal shape check:
//!   { "documents": [...], "customers": [...], "settings": {...} }
//! Anything else is rejected as InvalidBackup and the state is untouched.
//! ```

use chrono::NaiveDate;

use techfab_core::{AppState, Document};

use crate::error::{StoreError, StoreResult};

/// Parses a backup payload, enforcing the minimal shape before accepting.
///
/// The shape check is deliberately shallow - `documents` and `customers`
/// must be arrays and `settings` an object. Deeper problems (a document
/// missing its `number`, say) surface as a serialization error from the
/// full decode that follows.
pub fn parse_backup(payload: &str) -> StoreResult<AppState> {
    let value: serde_json::Value = serde_json::from_str(payload)?;

    let shape_ok = value.get("documents").is_some_and(|v| v.is_array())
        && value.get("customers").is_some_and(|v| v.is_array())
        && value.get("settings").is_some_and(|v| v.is_object());
    if !shape_ok {
        return Err(StoreError::InvalidBackup);
    }

    Ok(serde_json::from_value(value)?)
}

/// File name for a full-state backup: `techfab_backup_{YYYY-MM-DD}.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("techfab_backup_{}.json", date.format("%Y-%m-%d"))
}

/// File name for a single exported document:
/// `{TYPE}_{number}.pdf` with every non-alphanumeric in the number replaced
/// by an underscore (numbers are user-editable and may contain anything).
pub fn document_file_name(doc: &Document) -> String {
    let safe_number: String = doc
        .number
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}.pdf", doc.doc_type.prefix(), safe_number)
}

// =============================================================================
// Unit Tests
// =============================================================================
