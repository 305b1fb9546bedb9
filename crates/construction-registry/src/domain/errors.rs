use ledger_store::LedgerError;
use thiserror::Error;

/// Errors surfaced by registry operations.
///
/// No operation retries internally except the bounded commit-conflict retry;
/// every failure aborts the current request and the message reaches the
/// caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Wrong argument count for an operation. Nothing was written.
    #[error("incorrect number of arguments for {operation}: expected {expected}, got {got}")]
    InvalidArgument {
        operation: &'static str,
        expected: usize,
        got: usize,
    },

    /// An argument did not parse (non-integer floor, unknown status token).
    #[error("malformed {what}: {value:?}")]
    MalformedInput { what: &'static str, value: String },

    /// A record this operation must read does not exist.
    #[error("{kind} not found: {id:?}")]
    NotFound { kind: &'static str, id: String },

    /// Creating a home over an existing id is refused.
    #[error("home already exists: {id:?}")]
    AlreadyExists { id: String },

    /// Stored bytes are not a well-formed record.
    #[error("corrupt record at {key:?}: {reason}")]
    RecordDecode { key: String, reason: String },

    /// A record failed to encode for writing.
    #[error("failed to encode {kind} record: {reason}")]
    RecordEncode { kind: &'static str, reason: String },

    /// Ownership shares must cover the whole home.
    #[error("ownership split must sum to 100: builder {builder} + customer {customer}")]
    InvalidOwnershipSplit { builder: u32, customer: u32 },

    /// The verification gate: the bank endorsed the floor negatively.
    /// A business rejection, not a system fault; no state was changed.
    #[error("floor {floor} not completed")]
    VerificationRejected { floor: u32 },

    /// No endorsement recorded and policy requires one.
    #[error("no endorsement recorded for floor {floor}")]
    EndorsementMissing { floor: u32 },

    /// Guarded commit kept losing races past the retry budget.
    #[error("commit conflict persisted after {attempts} attempts")]
    CommitConflict { attempts: u32 },

    /// The request was cancelled before its commit; nothing was written.
    #[error("operation cancelled")]
    Cancelled,

    /// The dispatcher was handed an operation name it does not know.
    #[error("unknown operation: {0:?}")]
    UnknownOperation(String),

    /// Failure from the ledger store, fatal to the current request.
    #[error(transparent)]
    Store(#[from] LedgerError),
}
