use thiserror::Error;

/// Errors surfaced by ledger adapters.
///
/// Every variant is fatal to the current request; the store never retries
/// internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// I/O failure in the backing medium.
    #[error("ledger I/O error: {message}")]
    Io { message: String },

    /// Stored data could not be read back in the expected layout.
    #[error("ledger corruption: {message}")]
    Corrupt { message: String },

    /// A version guard in a committed batch did not match the stored version.
    #[error("version conflict on {key:?}: expected {expected}, found {found}")]
    VersionConflict {
        key: String,
        expected: u64,
        found: u64,
    },

    /// A composite key part contained the separator character.
    #[error("invalid composite key part {part:?}: must not contain {separator:?}")]
    InvalidCompositeKey { part: String, separator: char },
}

impl LedgerError {
    pub(crate) fn io(err: std::io::Error) -> Self {
        LedgerError::Io {
            message: err.to_string(),
        }
    }
}
