//! # construction-registry
//!
//! Construction progress registry over a shared ledger.
//!
//! ## Role in System
//!
//! - **Single Writer of Domain Records**: homes and towers live as JSON
//!   records in the ledger; endorsements as raw status tokens.
//! - **Completion Workflow**: per-(tower, floor) progression from
//!   "completion notified" through bank endorsement to "verified", with the
//!   verification gate blocking advancement on a negative endorsement.
//! - **Cascading Update**: a verified floor propagates to every home in that
//!   tower in one atomic guarded commit.
//!
//! ## State Machine
//!
//! ```text
//! NS  --notifyFloorCompletion--> COM
//! COM --verifyFloorCompletion--> endorsement OK / NOK recorded (tower unchanged)
//! [OK]  --obtainCompletionVerification--> VER + cascade to homes
//! [NOK] --obtainCompletionVerification--> rejected, nothing changes
//! ```
//!
//! ## Concurrency
//!
//! The service performs no locking of its own; every multi-key mutation is
//! staged into a [`ledger_store::WriteBatch`] guarded by the versions it
//! observed while reading, and retried a bounded number of times on conflict.

pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::entities::{
    EndorsementStatus, Home, HomeRecord, HomeStatus, Tower, TowerStatus,
};
pub use domain::errors::RegistryError;
pub use ports::inbound::{CompletionWorkflowApi, HomeLifecycleApi};
pub use service::{AbsentEndorsementPolicy, CancelToken, RegistryConfig, RegistryService};
