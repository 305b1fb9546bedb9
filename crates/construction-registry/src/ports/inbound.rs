//! # Driving Ports (Inbound)
//!
//! The operation surface the registry exposes to callers. Split along the
//! two concerns of the subsystem: the home lifecycle and the completion
//! workflow. `RegistryService` implements both; the dispatcher routes wire
//! operation names onto them.

use crate::domain::entities::{EndorsementStatus, HomeRecord};
use crate::domain::errors::RegistryError;

/// Home booking/ownership operations and ledger seeding.
pub trait HomeLifecycleApi {
    /// Seed the ledger with the fixture set of homes and towers.
    fn init_ledger(&mut self) -> Result<(), RegistryError>;

    /// Raw point read of a home record.
    ///
    /// Returns whatever bytes are stored; an absent key reads as an empty
    /// payload, not an error.
    fn query_home(&self, id: &str) -> Result<Vec<u8>, RegistryError>;

    /// Insert a new, unbooked home. Refused if the id already exists.
    fn create_home(&mut self, id: &str, tower_id: &str, floor: u32) -> Result<(), RegistryError>;

    /// Every home record, ascending by ledger key.
    fn query_all_homes(&self) -> Result<Vec<HomeRecord>, RegistryError>;

    /// Transfer a home to a new customer and mark it booked.
    fn change_home_ownership(&mut self, id: &str, new_customer: &str)
        -> Result<(), RegistryError>;
}

/// The per-(tower, floor) completion/endorsement state machine.
pub trait CompletionWorkflowApi {
    /// Builder reports a floor complete: tower moves to `COM` with that
    /// floor, unconditionally. Idempotent for identical arguments.
    fn notify_floor_completion(&mut self, tower_id: &str, floor: u32)
        -> Result<(), RegistryError>;

    /// Bank records its endorsement of a (tower, floor). Not gated on the
    /// tower's state: an endorsement may land before any notification.
    fn verify_floor_completion(
        &mut self,
        tower_id: &str,
        floor: u32,
        status: EndorsementStatus,
    ) -> Result<(), RegistryError>;

    /// The verification gate plus the cascading update: on a positive (or
    /// policy-passed absent) endorsement, the tower moves to `VER` and every
    /// home in it is stamped with the completed floor, atomically.
    fn obtain_completion_verification(
        &mut self,
        tower_id: &str,
        floor: u32,
    ) -> Result<(), RegistryError>;
}
