//! # Driven Ports (Outbound)
//!
//! Interfaces the registry depends on. The only one is the shared ledger:
//! a linearizable key-value store with ordered scans and atomic guarded
//! commits. The trait and its adapters live in the `ledger-store` crate so
//! the host application can pick the backing medium without touching this
//! crate.

pub use ledger_store::{
    BatchOperation, LedgerError, LedgerStore, VersionGuard, VersionedValue, WriteBatch,
};
