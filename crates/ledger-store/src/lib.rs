//! # ledger-store
//!
//! The shared-ledger abstraction the registry subsystem reads and writes.
//!
//! ## Role in System
//!
//! - **Driven Port**: `LedgerStore` is the interface the registry depends on;
//!   the host application picks the adapter.
//! - **Linearizable by contract**: adapters must apply a committed
//!   `WriteBatch` atomically and serialize conflicting commits.
//! - **Optimistic concurrency**: every key carries a write version; a commit
//!   can guard on the versions it observed and fails with
//!   [`LedgerError::VersionConflict`] when raced.
//!
//! ## Adapters
//!
//! - [`InMemoryLedger`] — `BTreeMap`-backed, for unit and integration tests.
//! - [`FileBackedLedger`] — single-file persistence with atomic rename,
//!   for running without a database server.

pub mod errors;
pub mod file;
pub mod keys;
pub mod memory;
pub mod store;

pub use errors::LedgerError;
pub use file::FileBackedLedger;
pub use keys::{composite_key, COMPOSITE_SEPARATOR};
pub use memory::InMemoryLedger;
pub use store::{BatchOperation, LedgerStore, VersionGuard, VersionedValue, WriteBatch};
