//! # Registry Service
//!
//! The service owning all registry operations. Generic over the ledger
//! adapter; all external effects go through the [`LedgerStore`] port.

mod completion;
mod homes;
mod repository;

use crate::domain::errors::RegistryError;
use crate::ports::outbound::{LedgerError, LedgerStore, WriteBatch};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the verification gate does when no endorsement record exists for the
/// requested (tower, floor).
///
/// The historical contract only blocked on an explicit `NOK`, so a floor
/// nobody had endorsed yet would pass the gate. Whether that was policy or a
/// bug is not decidable from the contract alone, so the choice is explicit
/// configuration here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentEndorsementPolicy {
    /// Reject until a bank has positively endorsed the floor.
    #[default]
    RequireEndorsement,
    /// Pass the gate on absence, matching the historical behavior.
    TreatAsEndorsed,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Bank whose endorsement the gate consults. The key layout supports
    /// many banks; one gate consults one bank.
    pub endorsing_bank: String,

    /// Gate behavior when no endorsement record exists.
    pub absent_endorsement: AbsentEndorsementPolicy,

    /// How many times a guarded commit is re-attempted after losing a race
    /// before the operation fails with `CommitConflict`.
    pub max_commit_retries: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endorsing_bank: "bank1".to_string(),
            absent_endorsement: AbsentEndorsementPolicy::default(),
            max_commit_retries: 3,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bank the verification gate consults.
    pub fn with_endorsing_bank(mut self, bank: impl Into<String>) -> Self {
        self.endorsing_bank = bank.into();
        self
    }

    /// Set the absent-endorsement gate policy.
    pub fn with_absent_endorsement(mut self, policy: AbsentEndorsementPolicy) -> Self {
        self.absent_endorsement = policy;
        self
    }

    /// Set the commit-conflict retry budget (minimum 1 attempt).
    pub fn with_max_commit_retries(mut self, retries: u32) -> Self {
        self.max_commit_retries = retries;
        self
    }
}

/// Cooperative cancellation flag for long scans.
///
/// Checked between records during the cascade's read/stage phase. Because
/// every mutation is staged and committed in one batch, a cancellation can
/// never leave partially applied writes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from another thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The Construction Registry Service.
///
/// Implements [`crate::ports::inbound::HomeLifecycleApi`] and
/// [`crate::ports::inbound::CompletionWorkflowApi`].
pub struct RegistryService<L: LedgerStore> {
    pub(crate) ledger: L,
    pub(crate) config: RegistryConfig,
    pub(crate) cancel: CancelToken,
}

impl<L: LedgerStore> RegistryService<L> {
    pub fn new(ledger: L, config: RegistryConfig) -> Self {
        Self {
            ledger,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// Attach a cancellation token observed by the cascade scan.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Read access to the backing ledger (inspection and tests).
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Run a read/stage/commit cycle, re-running the whole cycle when the
    /// commit loses a version race, up to the configured retry budget.
    ///
    /// The closure must do all its reads itself so a retry observes fresh
    /// versions.
    pub(crate) fn commit_with_retry<F>(
        &mut self,
        operation: &'static str,
        mut stage: F,
    ) -> Result<(), RegistryError>
    where
        F: FnMut(&mut Self) -> Result<WriteBatch, RegistryError>,
    {
        let budget = self.config.max_commit_retries.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let batch = stage(self)?;
            match self.ledger.commit(batch) {
                Ok(()) => return Ok(()),
                Err(LedgerError::VersionConflict { key, .. }) => {
                    if attempt >= budget {
                        tracing::warn!(
                            "[registry] {operation}: commit conflict on {key:?}, retry budget exhausted"
                        );
                        return Err(RegistryError::CommitConflict { attempts: attempt });
                    }
                    tracing::debug!(
                        "[registry] {operation}: commit conflict on {key:?}, retrying ({attempt}/{budget})"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
