//! # Document Numbering Authority
//!
//! Assigns the next sequential document number per type per calendar year.
//!
//! ## Number Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QT-2025-0001                                     │
//! │                        ─┬ ──┬─ ──┬─                                     │
//! │                         │   │    └── 4-digit sequence, resets yearly   │
//! │                         │   └────── calendar year                      │
//! │                         └────────── type prefix (QT / PI / DO / INV)   │
//! │                                                                         │
//! │  Sequence scan: max over same-type, not-deleted, same-year documents   │
//! │  (trailing segment parsed as integer; garbage segments are ignored).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{DocType, Document};
use crate::SEQ_WIDTH;

/// Returns the next number for a document of `doc_type` in `year`.
///
/// ## Algorithm
/// Filter to documents of the same type that are not soft-deleted and whose
/// number contains `-{year}-`; parse the trailing dash-delimited segment of
/// each as an integer (unparsable segments are skipped, not errors); take
/// the maximum, add one, zero-pad to four digits.
///
/// ## Year Rollover
/// The scan only matches the requested year, so each type restarts at 0001
/// every January regardless of last year's high-water mark.
///
/// ## Soft-Delete Reuse
/// Trashed documents are excluded from the scan, so their numbers return to
/// the pool. Restoring such a document after its number was reissued leaves
/// two documents sharing a number - an accepted risk in this single-user
/// product, kept for compatibility.
///
/// ## No Reservation
/// This is a pure scan. Calling it without persisting a document using the
/// result does not claim the number; two previews taken before either saves
/// will both see the same next number.
pub fn next_doc_number(docs: &[Document], doc_type: DocType, year: i32) -> String {
    let year_marker = format!("-{}-", year);

    let max_seq = docs
        .iter()
        .filter(|d| !d.is_deleted && d.doc_type == doc_type && d.number.contains(&year_marker))
        .filter_map(|d| d.number.rsplit('-').next()?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    format!(
        "{}-{}-{:0width$}",
        doc_type.prefix(),
        year,
        max_seq + 1,
        width = SEQ_WIDTH
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocStatus;

    fn doc(doc_type: DocType, number: &str, is_deleted: bool) -> Document {
        Document {
            id: number.to_string(),
            doc_type,
            is_deleted,
            number: number.to_string(),
            date: "2025-01-01".to_string(),
            customer_id: "c1".to_string(),
            items: Vec::new(),
            status: DocStatus::Draft,
            discount: 0.0,
            notes: None,
            converted_from_id: None,
        }
    }

    #[test]
    fn test_first_number_of_a_year() {
        assert_eq!(
            next_doc_number(&[], DocType::Quotation, 2025),
            "QT-2025-0001"
        );
    }

    #[test]
    fn test_increments_past_the_max() {
        let docs = vec![
            doc(DocType::Quotation, "QT-2025-0001", false),
            doc(DocType::Quotation, "QT-2025-0007", false),
            doc(DocType::Quotation, "QT-2025-0003", false),
        ];
        assert_eq!(
            next_doc_number(&docs, DocType::Quotation, 2025),
            "QT-2025-0008"
        );
    }

    #[test]
    fn test_types_count_independently() {
        let docs = vec![
            doc(DocType::Quotation, "QT-2025-0009", false),
            doc(DocType::Invoice, "INV-2025-0002", false),
        ];
        assert_eq!(
            next_doc_number(&docs, DocType::Invoice, 2025),
            "INV-2025-0003"
        );
        assert_eq!(
            next_doc_number(&docs, DocType::DeliveryOrder, 2025),
            "DO-2025-0001"
        );
    }

    #[test]
    fn test_year_rollover_resets_sequence() {
        let docs = vec![
            doc(DocType::Quotation, "QT-2024-0042", false),
            doc(DocType::Quotation, "QT-2024-0099", false),
        ];
        assert_eq!(
            next_doc_number(&docs, DocType::Quotation, 2025),
            "QT-2025-0001"
        );
    }

    #[test]
    fn test_soft_deleted_max_is_excluded_so_number_is_reused() {
        let docs = vec![
            doc(DocType::Invoice, "INV-2025-0004", false),
            doc(DocType::Invoice, "INV-2025-0005", true), // trashed high-water mark
        ];
        // 0005 returns to the pool - documented reuse behavior
        assert_eq!(
            next_doc_number(&docs, DocType::Invoice, 2025),
            "INV-2025-0005"
        );
    }

    #[test]
    fn test_manually_edited_garbage_numbers_are_skipped() {
        let docs = vec![
            doc(DocType::Quotation, "QT-2025-0002", false),
            doc(DocType::Quotation, "QT-2025-final", false),
            doc(DocType::Quotation, "custom-2025-", false),
        ];
        assert_eq!(
            next_doc_number(&docs, DocType::Quotation, 2025),
            "QT-2025-0003"
        );
    }

    #[test]
    fn test_sequence_grows_past_padding_width() {
        let docs = vec![doc(DocType::Quotation, "QT-2025-9999", false)];
        assert_eq!(
            next_doc_number(&docs, DocType::Quotation, 2025),
            "QT-2025-10000"
        );
    }
}
