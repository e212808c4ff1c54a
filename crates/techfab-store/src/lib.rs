//! # techfab-store: Application State Store
//!
//! Owns the single [`AppState`](techfab_core::AppState) aggregate and the
//! collaborator seams around it: persistence, backup, and the admin gate.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Every Mutation Command                             │
//! │                                                                         │
//! │  UI action                                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  BillingStore::create_document / convert_document / …                  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  techfab-core pure transform  (AppState, args) → AppState              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  replace the owned snapshot atomically                                  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  StatePersister::save(&AppState)   (whole-blob JSON)                    │
//! │                                                                         │
//! │  Callers only ever receive CLONED snapshots - nobody outside this      │
//! │  crate holds a mutable reference to the aggregate.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - the [`BillingStore`] service object
//! - [`persist`] - the `load`/`save` persistence seam (JSON file, in-memory)
//! - [`backup`] - full-state export/import and file naming conventions
//! - [`gate`] - the admin gate for irreversible operations
//! - [`error`] - store-level error types

pub mod backup;
pub mod error;
pub mod gate;
pub mod persist;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use gate::AdminGate;
pub use persist::{JsonFilePersister, MemoryPersister, StatePersister};
pub use store::BillingStore;
