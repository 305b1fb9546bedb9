use crate::errors::LedgerError;
use crate::store::{BatchOperation, LedgerStore, VersionedValue, WriteBatch};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::Bound;
use std::path::{Path, PathBuf};

/// File-backed ledger for running without a database server.
///
/// Keeps the full key set in memory and persists every mutation to a single
/// binary file, written atomically via a temp file and rename. Suitable for
/// development and single-process deployments; a real database adapter
/// belongs to the host application.
///
/// On-disk layout, repeated per entry:
/// `[key_len:u32 LE][key bytes][version:u64 LE][value_len:u32 LE][value bytes]`
#[derive(Debug)]
pub struct FileBackedLedger {
    entries: BTreeMap<String, VersionedValue>,
    path: PathBuf,
}

impl FileBackedLedger {
    /// Open the ledger at `path`, loading existing entries if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();

        let entries = match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).map_err(LedgerError::io)?;
                let entries = Self::decode_entries(&bytes)?;
                tracing::info!(
                    "[ledger] loaded {} keys from {}",
                    entries.len(),
                    path.display()
                );
                entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("[ledger] no ledger file at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(LedgerError::io(e)),
        };

        Ok(Self { entries, path })
    }

    fn decode_entries(bytes: &[u8]) -> Result<BTreeMap<String, VersionedValue>, LedgerError> {
        let mut entries = BTreeMap::new();
        let mut cursor = 0usize;

        while cursor < bytes.len() {
            let key = Self::read_chunk(bytes, &mut cursor)?;
            let key = String::from_utf8(key).map_err(|_| LedgerError::Corrupt {
                message: "ledger key is not valid UTF-8".to_string(),
            })?;

            let version_bytes: [u8; 8] = Self::read_exact(bytes, &mut cursor, 8)?
                .try_into()
                .map_err(|_| LedgerError::Corrupt {
                    message: "ledger file truncated".to_string(),
                })?;
            let version = u64::from_le_bytes(version_bytes);

            let value = Self::read_chunk(bytes, &mut cursor)?;
            entries.insert(key, VersionedValue { value, version });
        }

        Ok(entries)
    }

    fn read_exact<'a>(
        bytes: &'a [u8],
        cursor: &mut usize,
        len: usize,
    ) -> Result<&'a [u8], LedgerError> {
        let end = cursor
            .checked_add(len)
            .filter(|&e| e <= bytes.len())
            .ok_or_else(|| LedgerError::Corrupt {
                message: "ledger file truncated".to_string(),
            })?;
        let slice = &bytes[*cursor..end];
        *cursor = end;
        Ok(slice)
    }

    fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, LedgerError> {
        let len_bytes: [u8; 4] = Self::read_exact(bytes, cursor, 4)?
            .try_into()
            .map_err(|_| LedgerError::Corrupt {
                message: "ledger file truncated".to_string(),
            })?;
        let len = u32::from_le_bytes(len_bytes) as usize;
        Ok(Self::read_exact(bytes, cursor, len)?.to_vec())
    }

    fn save(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(LedgerError::io)?;
            }
        }

        let mut bytes = Vec::new();
        for (key, entry) in &self.entries {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key.as_bytes());
            bytes.extend_from_slice(&entry.version.to_le_bytes());
            bytes.extend_from_slice(&(entry.value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(&entry.value);
        }

        // Write atomically via temp file so a crash mid-save never corrupts
        // the live ledger file.
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(LedgerError::io)?;
        file.write_all(&bytes).map_err(LedgerError::io)?;
        file.sync_all().map_err(LedgerError::io)?;
        std::fs::rename(&temp_path, &self.path).map_err(LedgerError::io)?;

        Ok(())
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

impl LedgerStore for FileBackedLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.entries.get(key).map(|e| e.value.clone()))
    }

    fn get_versioned(&self, key: &str) -> Result<Option<VersionedValue>, LedgerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), LedgerError> {
        self.apply(BatchOperation::put(key, value));
        self.save()
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
        self.save()
    }
}
