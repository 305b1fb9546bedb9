use crate::errors::LedgerError;
use crate::store::{BatchOperation, LedgerStore, VersionedValue, WriteBatch};
use std::collections::BTreeMap;
use std::ops::Bound;

/// In-memory ledger for unit and integration tests.
///
/// Backed by a `BTreeMap` so range scans come back in ascending key order
/// without extra sorting. Batch commits are trivially atomic in a
/// single-threaded map.
#[derive(Default)]
pub struct InMemoryLedger {
    entries: BTreeMap<String, VersionedValue>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys. Test helper.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn current_version(&self, key: &str) -> u64 {
        self.entries.get(key).map(|e| e.version).unwrap_or(0)
    }

    fn apply(&mut self, op: BatchOperation) {
        match op {
            BatchOperation::Put { key, value } => {
                let version = self.current_version(&key) + 1;
                self.entries.insert(key, VersionedValue { value, version });
            }
        }
    }
}

impl LedgerStore for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.entries.get(key).map(|e| e.value.clone()))
    }

    fn get_versioned(&self, key: &str) -> Result<Option<VersionedValue>, LedgerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.apply(BatchOperation::put(key, value));
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let results = self
            .entries
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect();
        Ok(results)
    }

    fn prefix_scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, LedgerError> {
        let results = self
            .entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, e)| (k.clone(), e.value.clone()))
            .collect();
        Ok(results)
    }

    fn commit(&mut self, batch: WriteBatch) -> Result<(), LedgerError> {
        // Check every guard before touching anything.
        for guard in &batch.guards {
            let found = self.current_version(&guard.key);
            if found != guard.expected {
                return Err(LedgerError::VersionConflict {
                    key: guard.key.clone(),
                    expected: guard.expected,
                    found,
                });
            }
        }
        for op in batch.operations {
            self.apply(op);
        }
        Ok(())
    }
}
