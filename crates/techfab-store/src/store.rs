//! # Billing Store
//!
//! The service object owning the single [`AppState`] aggregate.
//!
//! ## Snapshot Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read  : snapshot() hands out a CLONE - callers can hold it as long    │
//! │          as they like, it never changes under them                     │
//! │  write : every command builds a new state via a pure transform, then   │
//! │          replaces the owned snapshot atomically, then persists         │
//! │                                                                         │
//! │  The persister is asked to save AFTER the snapshot is replaced; a      │
//! │  save failure surfaces as an error while the in-memory aggregate       │
//! │  keeps the new snapshot (persistence is a collaborator, not a          │
//! │  transaction manager).                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store also owns the clock: core transforms take dates as arguments,
//! and this is the one place `Local::now()` is read.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use techfab_core::lifecycle::{self, NewDocument};
use techfab_core::{AppState, CompanySettings, Customer, DocStatus, DocType, Document, Product};

use crate::backup::parse_backup;
use crate::error::StoreResult;
use crate::gate::AdminGate;
use crate::persist::StatePersister;

/// The application state store.
pub struct BillingStore<P: StatePersister> {
    state: AppState,
    persister: P,
}

impl<P: StatePersister> BillingStore<P> {
    /// Opens the store, restoring the persisted snapshot or starting fresh.
    pub fn open(persister: P) -> StoreResult<Self> {
        let state = match persister.load()? {
            Some(state) => {
                info!(
                    documents = state.documents.len(),
                    customers = state.customers.len(),
                    "state restored"
                );
                state
            }
            None => {
                info!("no persisted state, starting with defaults");
                AppState::default()
            }
        };
        Ok(BillingStore { state, persister })
    }

    /// A consistent snapshot of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    /// Replaces the aggregate and requests persistence of the new snapshot.
    fn commit(&mut self, next: AppState) -> StoreResult<()> {
        self.state = next;
        self.persister.save(&self.state)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    // =========================================================================
    // Document Commands
    // =========================================================================

    /// Creates a document: validates, numbers, appends, persists.
    pub fn create_document(&mut self, new: NewDocument) -> StoreResult<Document> {
        let (next, doc) = lifecycle::create_document(&self.state, new, Self::today())?;
        info!(id = %doc.id, number = %doc.number, "document created");
        self.commit(next)?;
        Ok(doc)
    }

    /// Replaces a document by id, re-running item validation.
    pub fn update_document(&mut self, doc: Document) -> StoreResult<()> {
        let id = doc.id.clone();
        let next = lifecycle::update_document(&self.state, doc)?;
        debug!(id = %id, "document updated");
        self.commit(next)
    }

    /// Converts a document, returning the freshly created one.
    pub fn convert_document(&mut self, id: &str, target: DocType) -> StoreResult<Document> {
        let (next, doc) = lifecycle::convert_document(&self.state, id, target, Self::today())?;
        info!(source = %id, id = %doc.id, number = %doc.number, "document converted");
        self.commit(next)?;
        Ok(doc)
    }

    /// Sets a document's status (free mutation, no transition table).
    pub fn update_status(&mut self, id: &str, status: DocStatus) -> StoreResult<()> {
        let next = lifecycle::update_status(&self.state, id, status);
        debug!(id = %id, ?status, "status updated");
        self.commit(next)
    }

    /// Moves a document to the recycle bin.
    pub fn soft_delete(&mut self, id: &str) -> StoreResult<()> {
        let next = lifecycle::soft_delete(&self.state, id);
        info!(id = %id, "document moved to recycle bin");
        self.commit(next)
    }

    /// Restores a document from the recycle bin.
    pub fn restore_document(&mut self, id: &str) -> StoreResult<()> {
        let next = lifecycle::restore(&self.state, id);
        info!(id = %id, "document restored");
        self.commit(next)
    }

    /// Permanently removes a document. Irreversible, hence the gate.
    pub fn purge_forever(&mut self, id: &str, _gate: &AdminGate) -> StoreResult<()> {
        let next = lifecycle::purge_forever(&self.state, id);
        warn!(id = %id, "document permanently deleted");
        self.commit(next)
    }

    // =========================================================================
    // Customer Commands
    // =========================================================================

    pub fn add_customer(&mut self, customer: Customer) -> StoreResult<()> {
        let mut next = self.state.clone();
        debug!(id = %customer.id, "customer added");
        next.customers.push(customer);
        self.commit(next)
    }

    pub fn update_customer(&mut self, customer: Customer) -> StoreResult<()> {
        let mut next = self.state.clone();
        if let Some(slot) = next.customers.iter_mut().find(|c| c.id == customer.id) {
            *slot = customer;
        }
        self.commit(next)
    }

    /// Hard delete - there is no recycle bin for customers, and documents
    /// referencing this customer keep their (now dangling) id.
    pub fn delete_customer(&mut self, id: &str) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.customers.retain(|c| c.id != id);
        info!(id = %id, "customer deleted");
        self.commit(next)
    }

    // =========================================================================
    // Product Commands
    // =========================================================================

    pub fn add_product(&mut self, product: Product) -> StoreResult<()> {
        let mut next = self.state.clone();
        debug!(id = %product.id, "product added");
        next.products.push(product);
        self.commit(next)
    }

    pub fn update_product(&mut self, product: Product) -> StoreResult<()> {
        let mut next = self.state.clone();
        if let Some(slot) = next.products.iter_mut().find(|p| p.id == product.id) {
            *slot = product;
        }
        self.commit(next)
    }

    pub fn delete_product(&mut self, id: &str) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.products.retain(|p| p.id != id);
        self.commit(next)
    }

    // =========================================================================
    // Settings / Reset
    // =========================================================================

    /// Replaces the company settings singleton.
    pub fn update_settings(&mut self, settings: CompanySettings) -> StoreResult<()> {
        let mut next = self.state.clone();
        next.settings = settings;
        info!("settings updated");
        self.commit(next)
    }

    /// Wipes everything back to a fresh install. Irreversible, hence the gate.
    pub fn factory_reset(&mut self, _gate: &AdminGate) -> StoreResult<()> {
        warn!("factory reset");
        self.commit(AppState::default())
    }

    // =========================================================================
    // Backup Export / Import
    // =========================================================================

    /// Serializes the full state for backup, stamping `lastBackupDate`.
    ///
    /// The stamp is part of the state (and persisted), so the exported
    /// payload and the aggregate agree - importing the payload back
    /// reproduces the state exactly.
    pub fn export_backup(&mut self) -> StoreResult<String> {
        let mut next = self.state.clone();
        next.last_backup_date = Some(Self::today().format("%Y-%m-%d").to_string());
        self.commit(next)?;
        let payload = serde_json::to_string_pretty(&self.state)?;
        info!(bytes = payload.len(), "backup exported");
        Ok(payload)
    }

    /// Replaces the whole state from a backup payload.
    ///
    /// The payload must pass the minimal shape check; otherwise the import
    /// is rejected and the current state is untouched.
    pub fn import_backup(&mut self, payload: &str) -> StoreResult<()> {
        let restored = parse_backup(payload)?;
        info!(
            documents = restored.documents.len(),
            customers = restored.customers.len(),
            "backup imported"
        );
        self.commit(restored)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use techfab_core::report;
    use techfab_core::LineItem;

    use crate::persist::MemoryPersister;

    fn store() -> BillingStore<MemoryPersister> {
        BillingStore::open(MemoryPersister::new()).unwrap()
    }

    fn item(description: &str, quantity: f64, unit_price: f64) -> LineItem {
        LineItem {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.to_string(),
            quantity,
            unit_price,
            tax_rate: 0.08,
        }
    }

    fn new_doc(doc_type: DocType) -> NewDocument {
        NewDocument {
            doc_type,
            customer_id: "c1".to_string(),
            date: None,
            items: vec![item("Fabrication work", 2.0, 100.0)],
            discount: 0.0,
            notes: None,
        }
    }

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            attention_to: None,
            tin: None,
            brn: None,
        }
    }

    #[test]
    fn test_create_updates_snapshot_and_persists() {
        let mut store = store();
        let doc = store.create_document(new_doc(DocType::Quotation)).unwrap();

        assert!(doc.number.starts_with("QT-"));
        assert!(doc.number.ends_with("-0001"));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.documents.len(), 1);
        // Persisted blob matches the live snapshot
        assert_eq!(store.persister.saved().unwrap(), snapshot);
    }

    #[test]
    fn test_rejected_create_leaves_everything_untouched() {
        let mut store = store();
        let mut bad = new_doc(DocType::Quotation);
        bad.items[0].quantity = 0.0;

        let err = store.create_document(bad).unwrap_err();
        assert!(err.to_string().contains("item 1"));
        assert!(store.snapshot().documents.is_empty());
        assert!(store.persister.saved().is_none());
    }

    #[test]
    fn test_snapshots_are_isolated_from_later_mutations() {
        let mut store = store();
        let before = store.snapshot();
        store.create_document(new_doc(DocType::Quotation)).unwrap();

        assert!(before.documents.is_empty());
        assert_eq!(store.snapshot().documents.len(), 1);
    }

    #[test]
    fn test_convert_through_store() {
        let mut store = store();
        let quotation = store.create_document(new_doc(DocType::Quotation)).unwrap();
        let delivery = store
            .convert_document(&quotation.id, DocType::DeliveryOrder)
            .unwrap();

        assert!(delivery.number.starts_with("DO-"));
        let snapshot = store.snapshot();
        assert_eq!(
            snapshot.document(&quotation.id).unwrap().status,
            DocStatus::Converted
        );
        assert_eq!(snapshot.documents.len(), 2);
    }

    #[test]
    fn test_purge_requires_gate_and_removes() {
        let mut store = store();
        let doc = store.create_document(new_doc(DocType::Invoice)).unwrap();
        store.soft_delete(&doc.id).unwrap();

        let gate = AdminGate::unlock("5328", "5328").unwrap();
        store.purge_forever(&doc.id, &gate).unwrap();
        assert!(store.snapshot().documents.is_empty());
    }

    #[test]
    fn test_factory_reset_returns_to_defaults() {
        let mut store = store();
        store.create_document(new_doc(DocType::Invoice)).unwrap();
        store.add_customer(customer("c1", "Ah Seng Hardware")).unwrap();

        let gate = AdminGate::unlock("1", "1").unwrap();
        store.factory_reset(&gate).unwrap();
        assert_eq!(store.snapshot(), AppState::default());
    }

    #[test]
    fn test_customer_hard_delete_leaves_dangling_reference() {
        let mut store = store();
        store.add_customer(customer("c1", "Ah Seng Hardware")).unwrap();
        let doc = store.create_document(new_doc(DocType::Invoice)).unwrap();

        store.delete_customer("c1").unwrap();

        let snapshot = store.snapshot();
        // The document keeps its stale reference and renders as Unknown
        assert_eq!(snapshot.document(&doc.id).unwrap().customer_id, "c1");
        let payload = report::print_payload(&snapshot, &doc.id).unwrap();
        assert_eq!(payload.customer.name, "Unknown");
    }

    #[test]
    fn test_update_and_delete_product() {
        let mut store = store();
        let product = Product {
            id: "p1".to_string(),
            name: "Steel bracket".to_string(),
            price: 12.5,
            description: None,
            tax_rate: Some(0.08),
        };
        store.add_product(product.clone()).unwrap();

        let mut cheaper = product.clone();
        cheaper.price = 9.9;
        store.update_product(cheaper).unwrap();
        assert_eq!(store.snapshot().products[0].price, 9.9);

        store.delete_product("p1").unwrap();
        assert!(store.snapshot().products.is_empty());
    }

    #[test]
    fn test_update_settings() {
        let mut store = store();
        let mut settings = CompanySettings::default();
        settings.name = "Techfab Engineering Sdn Bhd".to_string();
        settings.sst_rate = 0.06;
        store.update_settings(settings.clone()).unwrap();
        assert_eq!(store.snapshot().settings, settings);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = store();
        store.add_customer(customer("c1", "Ah Seng Hardware")).unwrap();
        store.create_document(new_doc(DocType::Quotation)).unwrap();
        store.create_document(new_doc(DocType::Invoice)).unwrap();

        let payload = store.export_backup().unwrap();
        let exported_state = store.snapshot();
        assert!(exported_state.last_backup_date.is_some());

        // Wipe, then restore from the payload
        let gate = AdminGate::unlock("1", "1").unwrap();
        store.factory_reset(&gate).unwrap();
        store.import_backup(&payload).unwrap();

        assert_eq!(store.snapshot(), exported_state);
    }

    #[test]
    fn test_import_rejection_leaves_state_untouched() {
        let mut store = store();
        store.create_document(new_doc(DocType::Quotation)).unwrap();
        let before = store.snapshot();

        let err = store.import_backup(r#"{"customers": []}"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid backup file format");
        assert_eq!(store.snapshot(), before);
    }
}
