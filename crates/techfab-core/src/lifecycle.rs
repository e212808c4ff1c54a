//! # Document Lifecycle State Machine
//!
//! Status transitions, type-conversion chains and soft-delete semantics,
//! expressed as pure transforms over [`AppState`].
//!
//! ## Lifecycle Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Document Lifecycle                                 │
//! │                                                                         │
//! │   create ──► Draft ──► Sent ──► Paid                                   │
//! │                │         │        ▲│                                    │
//! │                │         │        │▼  (Paid ⇄ Draft: "mark unpaid")    │
//! │                │         └──► Cancelled ◄── (any status)               │
//! │                │                                                        │
//! │                └── convert ──► source becomes Converted,               │
//! │                                a NEW Draft document is appended        │
//! │                                                                        │
//! │   soft_delete ⇄ restore    (recycle bin, flag only)                   │
//! │   purge_forever            (irrevocable, gated by the store layer)     │
//! │                                                                         │
//! │  update_status is a FREE mutation - there is no transition table.      │
//! │  Conversion is the only operation that touches a second document.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Copy-on-Write Contract
//! Every function takes `&AppState` and returns a fresh snapshot; the input
//! is never mutated, so a caller holding the previous snapshot keeps a
//! consistent view. Operations addressing an unknown id are lenient no-ops
//! (a map/filter that matches nothing), except conversion, which must
//! produce the new document and therefore reports `DocumentNotFound`.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::numbering::next_doc_number;
use crate::types::{AppState, DocStatus, DocType, Document, LineItem};
use crate::validation::validate_document_fields;

// =============================================================================
// Create
// =============================================================================

/// The caller-supplied parts of a document about to be created.
///
/// Everything else (id, number, status, deletion flag) is assigned here at
/// materialization time.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub doc_type: DocType,
    pub customer_id: String,
    /// Defaults to `today` when not supplied by the form.
    pub date: Option<String>,
    pub items: Vec<LineItem>,
    pub discount: f64,
    pub notes: Option<String>,
}

/// Creates a document: validates, numbers, and appends it.
///
/// ## Failure
/// Any validation failure rejects the whole create; the returned state is
/// never partially modified. The error names the offending row (1-indexed).
///
/// ## Numbering
/// The number is assigned at this moment from the passed snapshot. Two
/// speculative previews taken against the same snapshot will materialize
/// the same number - the accepted single-user race discussed on
/// [`next_doc_number`].
pub fn create_document(
    state: &AppState,
    new: NewDocument,
    today: NaiveDate,
) -> CoreResult<(AppState, Document)> {
    validate_document_fields(&new.customer_id, &new.items)?;

    let document = Document {
        id: Uuid::new_v4().to_string(),
        doc_type: new.doc_type,
        is_deleted: false,
        number: next_doc_number(&state.documents, new.doc_type, today.year()),
        date: new
            .date
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        customer_id: new.customer_id,
        items: new.items,
        status: DocStatus::Draft,
        discount: new.discount,
        notes: new.notes,
        converted_from_id: None,
    };

    let mut next = state.clone();
    next.documents.push(document.clone());
    Ok((next, document))
}

// =============================================================================
// Update
// =============================================================================

/// Replaces a document wholesale by id.
///
/// Item validation runs again; number and type are taken as-is (both are
/// user-editable after creation, and edited numbers are deliberately NOT
/// revalidated for uniqueness). An unknown id leaves the state unchanged.
pub fn update_document(state: &AppState, doc: Document) -> CoreResult<AppState> {
    validate_document_fields(&doc.customer_id, &doc.items)?;

    let mut next = state.clone();
    if let Some(slot) = next.documents.iter_mut().find(|d| d.id == doc.id) {
        *slot = doc;
    }
    Ok(next)
}

// =============================================================================
// Convert
// =============================================================================

/// Converts a document into `target`, returning the new state and the
/// freshly created document.
///
/// ## Effects
/// - New document: fresh id, customer/items copied verbatim, number freshly
///   assigned for the target type, date = today, status Draft, discount
///   carried over, `converted_from_id` pointing back, and notes prefixed
///   with a `Ref: {source.number}` backlink line.
/// - Source document: status set to `Converted`. Nothing else about it
///   changes - it stays visible, merely excluded from active dashboards.
///
/// The `Ref:` note and the structured `converted_from_id` carry the same
/// fact; the note is what prints, the id is what tooling follows.
pub fn convert_document(
    state: &AppState,
    id: &str,
    target: DocType,
    today: NaiveDate,
) -> CoreResult<(AppState, Document)> {
    let source = state
        .document(id)
        .ok_or_else(|| CoreError::DocumentNotFound(id.to_string()))?;

    if !source.doc_type.can_convert_to(target) {
        return Err(CoreError::ConversionNotAllowed {
            from: source.doc_type,
            to: target,
        });
    }

    let back_reference = format!("Ref: {}", source.number);
    let notes = match source.notes.as_deref() {
        Some(original) if !original.is_empty() => {
            format!("{}\n{}", back_reference, original)
        }
        _ => back_reference,
    };

    let converted = Document {
        id: Uuid::new_v4().to_string(),
        doc_type: target,
        is_deleted: false,
        number: next_doc_number(&state.documents, target, today.year()),
        date: today.format("%Y-%m-%d").to_string(),
        customer_id: source.customer_id.clone(),
        items: source.items.clone(),
        status: DocStatus::Draft,
        discount: source.discount,
        notes: Some(notes),
        converted_from_id: Some(source.id.clone()),
    };

    let mut next = state.clone();
    for slot in next.documents.iter_mut() {
        if slot.id == id {
            slot.status = DocStatus::Converted;
        }
    }
    next.documents.push(converted.clone());
    Ok((next, converted))
}

// =============================================================================
// Status / Deletion Flags
// =============================================================================

/// Sets a document's status directly.
///
/// No transition table is enforced here - any status can replace any other
/// (this is how "mark unpaid" flips Paid back to Draft). Unknown ids are a
/// no-op.
pub fn update_status(state: &AppState, id: &str, status: DocStatus) -> AppState {
    map_document(state, id, |doc| doc.status = status)
}

/// Moves a document to the recycle bin. The document stays in storage and
/// is excluded from listings, reports and the numbering scan.
pub fn soft_delete(state: &AppState, id: &str) -> AppState {
    map_document(state, id, |doc| doc.is_deleted = true)
}

/// Brings a document back from the recycle bin, exactly as it was.
pub fn restore(state: &AppState, id: &str) -> AppState {
    map_document(state, id, |doc| doc.is_deleted = false)
}

/// Removes a document from storage irrecoverably.
///
/// The store layer requires an unlocked admin gate before calling this;
/// the transform itself is just a filter. Unknown ids are a no-op.
pub fn purge_forever(state: &AppState, id: &str) -> AppState {
    let mut next = state.clone();
    next.documents.retain(|d| d.id != id);
    next
}

/// Applies `f` to the document with `id` in a cloned snapshot.
fn map_document(state: &AppState, id: &str, f: impl FnOnce(&mut Document)) -> AppState {
    let mut next = state.clone();
    if let Some(doc) = next.documents.iter_mut().find(|d| d.id == id) {
        f(doc);
    }
    next
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(description: &str, quantity: f64, unit_price: f64, tax_rate: f64) -> LineItem {
        LineItem {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            quantity,
            unit_price,
            tax_rate,
        }
    }

    fn new_quotation(items: Vec<LineItem>) -> NewDocument {
        NewDocument {
            doc_type: DocType::Quotation,
            customer_id: "c1".to_string(),
            date: None,
            items,
            discount: 0.0,
            notes: None,
        }
    }

    #[test]
    fn test_create_assigns_number_date_and_draft_status() {
        let state = AppState::default();
        let (next, doc) = create_document(
            &state,
            new_quotation(vec![item("Fabrication", 2.0, 100.0, 0.08)]),
            day(2025, 3, 14),
        )
        .unwrap();

        assert_eq!(doc.number, "QT-2025-0001");
        assert_eq!(doc.date, "2025-03-14");
        assert_eq!(doc.status, DocStatus::Draft);
        assert!(!doc.is_deleted);
        assert_eq!(next.documents.len(), 1);
        // Input snapshot untouched
        assert!(state.documents.is_empty());
    }

    #[test]
    fn test_sequential_creates_number_gaplessly() {
        let mut state = AppState::default();
        let mut numbers = Vec::new();
        for _ in 0..5 {
            let (next, doc) = create_document(
                &state,
                new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
                day(2025, 6, 1),
            )
            .unwrap();
            numbers.push(doc.number.clone());
            state = next;
        }
        assert_eq!(
            numbers,
            vec![
                "QT-2025-0001",
                "QT-2025-0002",
                "QT-2025-0003",
                "QT-2025-0004",
                "QT-2025-0005"
            ]
        );
    }

    #[test]
    fn test_create_rejects_bad_row_without_touching_state() {
        let state = AppState::default();
        let err = create_document(
            &state,
            new_quotation(vec![
                item("ok", 1.0, 10.0, 0.0),
                item("bad", 0.0, 10.0, 0.0),
            ]),
            day(2025, 6, 1),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Validation error: item 2: quantity must be at least 1");
        assert!(state.documents.is_empty());
    }

    #[test]
    fn test_explicit_date_is_kept() {
        let state = AppState::default();
        let mut new = new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]);
        new.date = Some("2025-01-31".to_string());
        let (_, doc) = create_document(&state, new, day(2025, 6, 1)).unwrap();
        assert_eq!(doc.date, "2025-01-31");
    }

    #[test]
    fn test_update_replaces_by_id_and_revalidates() {
        let state = AppState::default();
        let (state, doc) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 6, 1),
        )
        .unwrap();

        let mut edited = doc.clone();
        edited.discount = 3.0;
        edited.number = "QT-2025-CUSTOM".to_string(); // manual edit, accepted as-is
        let next = update_document(&state, edited.clone()).unwrap();
        assert_eq!(next.document(&doc.id).unwrap(), &edited);

        let mut broken = doc.clone();
        broken.items[0].description = String::new();
        assert!(update_document(&state, broken).is_err());
    }

    #[test]
    fn test_update_unknown_id_is_a_no_op() {
        let state = AppState::default();
        let (state, doc) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 6, 1),
        )
        .unwrap();

        let mut ghost = doc.clone();
        ghost.id = "missing".to_string();
        ghost.discount = 99.0;
        let next = update_document(&state, ghost).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_convert_quotation_to_delivery_order() {
        let state = AppState::default();
        let mut new = new_quotation(vec![item("Bracket", 2.0, 100.0, 0.08)]);
        new.notes = Some("Site delivery".to_string());
        let (state, quotation) = create_document(&state, new, day(2025, 4, 2)).unwrap();

        let (next, delivery) =
            convert_document(&state, &quotation.id, DocType::DeliveryOrder, day(2025, 4, 9))
                .unwrap();

        // The new document
        assert_eq!(delivery.doc_type, DocType::DeliveryOrder);
        assert_eq!(delivery.number, "DO-2025-0001");
        assert_eq!(delivery.status, DocStatus::Draft);
        assert_eq!(delivery.date, "2025-04-09");
        assert_eq!(delivery.items, quotation.items);
        assert_eq!(delivery.customer_id, quotation.customer_id);
        assert_eq!(
            delivery.notes.as_deref(),
            Some("Ref: QT-2025-0001\nSite delivery")
        );
        assert_eq!(delivery.converted_from_id.as_deref(), Some(quotation.id.as_str()));
        assert_ne!(delivery.id, quotation.id);

        // The source: status flipped, everything else untouched
        let source = next.document(&quotation.id).unwrap();
        assert_eq!(source.status, DocStatus::Converted);
        let mut expected = quotation.clone();
        expected.status = DocStatus::Converted;
        assert_eq!(source, &expected);

        assert_eq!(next.documents.len(), 2);
    }

    #[test]
    fn test_convert_without_notes_gets_bare_backlink() {
        let state = AppState::default();
        let (state, quotation) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 4, 2),
        )
        .unwrap();

        let (_, proforma) =
            convert_document(&state, &quotation.id, DocType::Proforma, day(2025, 4, 2)).unwrap();
        assert_eq!(proforma.notes.as_deref(), Some("Ref: QT-2025-0001"));
        assert_eq!(proforma.number, "PI-2025-0001");
    }

    #[test]
    fn test_convert_carries_discount() {
        let state = AppState::default();
        let mut new = new_quotation(vec![item("Work", 1.0, 100.0, 0.0)]);
        new.discount = 25.0;
        let (state, quotation) = create_document(&state, new, day(2025, 4, 2)).unwrap();

        let (_, proforma) =
            convert_document(&state, &quotation.id, DocType::Proforma, day(2025, 4, 2)).unwrap();
        assert_eq!(proforma.discount, 25.0);
    }

    #[test]
    fn test_convert_rejects_funnel_skips() {
        let state = AppState::default();
        let (state, quotation) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 4, 2),
        )
        .unwrap();

        let err = convert_document(&state, &quotation.id, DocType::Invoice, day(2025, 4, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::ConversionNotAllowed {
                from: DocType::Quotation,
                to: DocType::Invoice
            }
        ));
        // Nothing changed
        assert_eq!(state.document(&quotation.id).unwrap().status, DocStatus::Draft);
    }

    #[test]
    fn test_convert_unknown_id_reports_not_found() {
        let state = AppState::default();
        let err =
            convert_document(&state, "missing", DocType::Proforma, day(2025, 4, 2)).unwrap_err();
        assert!(matches!(err, CoreError::DocumentNotFound(_)));
    }

    #[test]
    fn test_full_chain_quotation_to_invoice() {
        let state = AppState::default();
        let (state, qt) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 4, 2),
        )
        .unwrap();
        let (state, pi) =
            convert_document(&state, &qt.id, DocType::Proforma, day(2025, 4, 3)).unwrap();
        let (state, inv) =
            convert_document(&state, &pi.id, DocType::Invoice, day(2025, 4, 4)).unwrap();

        assert_eq!(inv.number, "INV-2025-0001");
        // Lineage is walkable id-by-id
        assert_eq!(inv.converted_from_id.as_deref(), Some(pi.id.as_str()));
        assert_eq!(pi.converted_from_id.as_deref(), Some(qt.id.as_str()));
        // And readable in the notes
        assert!(inv.notes.as_deref().unwrap().starts_with("Ref: PI-2025-0001"));

        assert_eq!(state.document(&qt.id).unwrap().status, DocStatus::Converted);
        assert_eq!(state.document(&pi.id).unwrap().status, DocStatus::Converted);
        assert_eq!(state.document(&inv.id).unwrap().status, DocStatus::Draft);
    }

    #[test]
    fn test_update_status_is_free_including_paid_to_draft() {
        let state = AppState::default();
        let (state, doc) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 6, 1),
        )
        .unwrap();

        let state = update_status(&state, &doc.id, DocStatus::Paid);
        assert_eq!(state.document(&doc.id).unwrap().status, DocStatus::Paid);

        // "Mark unpaid"
        let state = update_status(&state, &doc.id, DocStatus::Draft);
        assert_eq!(state.document(&doc.id).unwrap().status, DocStatus::Draft);

        // Unknown id: no-op
        let same = update_status(&state, "missing", DocStatus::Cancelled);
        assert_eq!(same, state);
    }

    #[test]
    fn test_soft_delete_restore_round_trip() {
        let state = AppState::default();
        let (state, doc) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 6, 1),
        )
        .unwrap();

        let deleted = soft_delete(&state, &doc.id);
        assert!(deleted.document(&doc.id).unwrap().is_deleted);
        assert_eq!(deleted.documents.len(), 1);

        let restored = restore(&deleted, &doc.id);
        // Identical to the pre-delete form, flag included
        assert_eq!(restored.document(&doc.id).unwrap(), &doc);
        assert_eq!(restored, state);
    }

    #[test]
    fn test_purge_removes_irrecoverably() {
        let state = AppState::default();
        let (state, doc) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 6, 1),
        )
        .unwrap();

        let purged = purge_forever(&state, &doc.id);
        assert!(purged.documents.is_empty());

        // Unknown id: no-op
        let same = purge_forever(&purged, &doc.id);
        assert_eq!(same, purged);
    }

    #[test]
    fn test_soft_deleted_number_reuse_then_restore_collides() {
        // Documented behavior: trashing the high-water mark returns its
        // number to the pool; restoring it later leaves two documents
        // sharing the number.
        let state = AppState::default();
        let (state, first) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 6, 1),
        )
        .unwrap();

        let state = soft_delete(&state, &first.id);
        let (state, second) = create_document(
            &state,
            new_quotation(vec![item("Work", 1.0, 10.0, 0.0)]),
            day(2025, 6, 2),
        )
        .unwrap();
        assert_eq!(second.number, first.number);

        let state = restore(&state, &first.id);
        let duplicates: Vec<_> = state
            .documents
            .iter()
            .filter(|d| d.number == first.number)
            .collect();
        assert_eq!(duplicates.len(), 2);
    }
}
