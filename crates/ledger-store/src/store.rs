//! # Ledger Store Port
//!
//! Abstract interface for the shared key-value ledger.
//!
//! Adapters must provide:
//! - point reads where an absent key is an empty result, not an error
//! - ascending, finite range scans
//! - atomic application of a whole [`WriteBatch`], with version guards
//!   checked before any operation is applied

use crate::errors::LedgerError;

/// A stored value together with its write version.
///
/// Versions start at 1 on first write and increase by one per write to the
/// same key. Version 0 means "never written" and is only ever used inside
/// guards (`WriteBatch::expect_absent`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: u64,
}

/// Abstract interface for the shared ledger.
///
/// Testing: `InMemoryLedger`. Durable single-process: `FileBackedLedger`.
/// A database-server adapter belongs to the host application.
pub trait LedgerStore: Send + Sync {
    /// Get a value by key. Absent keys read as `None`, never as an error.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Get a value together with its write version.
    fn get_versioned(&self, key: &str) -> Result<Option<VersionedValue>, LedgerError>;

    /// Unconditional single-key write.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError>;

    /// All pairs with `start <= key < end`, ascending by key. Finite.
    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;

    /// All pairs whose key starts with `prefix`, ascending by key.
    fn prefix_scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError>;

    /// Apply a batch atomically.
    ///
    /// Every guard is checked against the current store state first; a stale
    /// guard fails the whole batch with [`LedgerError::VersionConflict`] and
    /// nothing is applied. Either ALL operations take effect or NONE do.
    fn commit(&mut self, batch: WriteBatch) -> Result<(), LedgerError>;
}

/// Expected-version precondition for a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGuard {
    pub key: String,
    /// Version observed at read time; 0 asserts the key is absent.
    pub expected: u64,
}

/// A single operation inside a [`WriteBatch`].
///
/// Ledger records in this system are never deleted, so puts are the only
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    Put { key: String, value: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key this operation touches.
    pub fn key(&self) -> &str {
        match self {
            BatchOperation::Put { key, .. } => key,
        }
    }
}

/// An atomic, guarded multi-key write.
///
/// Built up during the read/stage phase of a request and committed in one
/// call, so a failure at any point before `commit` leaves the ledger
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    pub guards: Vec<VersionGuard>,
    pub operations: Vec<BatchOperation>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard the batch on `key` still being at `version`.
    pub fn expect(&mut self, key: impl Into<String>, version: u64) {
        self.guards.push(VersionGuard {
            key: key.into(),
            expected: version,
        });
    }

    /// Guard the batch on `key` not existing yet.
    pub fn expect_absent(&mut self, key: impl Into<String>) {
        self.expect(key, 0);
    }

    /// Stage a put.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.operations.push(BatchOperation::put(key, value));
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of staged operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }
}
