//! The completion workflow: notification, endorsement, and the verification
//! gate with its cascading update.
//!
//! The cascade is the one multi-record mutation in the system. It runs as a
//! staged commit: scan the home namespace, decode everything first, stage
//! the tower transition and every affected home into one guarded batch, and
//! commit once. A decode failure, cancellation, or lost version race before
//! the commit leaves the ledger byte-for-byte unchanged.

use super::repository::{decode_home, encode_home, encode_tower};
use super::{AbsentEndorsementPolicy, RegistryService};
use crate::domain::entities::{EndorsementStatus, HomeStatus};
use crate::domain::errors::RegistryError;
use crate::domain::keys::{endorsement_key, KeyPrefix};
use crate::ports::inbound::CompletionWorkflowApi;
use crate::ports::outbound::{LedgerStore, WriteBatch};

impl<L: LedgerStore> CompletionWorkflowApi for RegistryService<L> {
    fn notify_floor_completion(
        &mut self,
        tower_id: &str,
        floor: u32,
    ) -> Result<(), RegistryError> {
        self.commit_with_retry("notifyFloorCompletion", |svc| {
            let (mut tower, version) =
                svc.load_tower(tower_id)?
                    .ok_or_else(|| RegistryError::NotFound {
                        kind: "tower",
                        id: tower_id.to_string(),
                    })?;
            tower.record_notification(floor);

            let key = KeyPrefix::tower_key(tower_id);
            let mut batch = WriteBatch::new();
            batch.expect(&key, version);
            batch.put(&key, encode_tower(&tower)?);
            Ok(batch)
        })?;

        tracing::info!("[registry] tower {tower_id:?}: floor {floor} completion notified");
        Ok(())
    }

    fn verify_floor_completion(
        &mut self,
        tower_id: &str,
        floor: u32,
        status: EndorsementStatus,
    ) -> Result<(), RegistryError> {
        // Deliberately not gated on the tower's state: the endorsement side
        // table is independent of the notification having run.
        let key = endorsement_key(tower_id, floor, &self.config.endorsing_bank)?;
        self.ledger.put(&key, status.as_str().as_bytes())?;

        tracing::info!(
            "[registry] endorsement {status} recorded for tower {tower_id:?} floor {floor}"
        );
        Ok(())
    }

    fn obtain_completion_verification(
        &mut self,
        tower_id: &str,
        floor: u32,
    ) -> Result<(), RegistryError> {
        // The verification gate.
        match self.load_endorsement(tower_id, floor)? {
            Some(EndorsementStatus::Nok) => {
                tracing::info!(
                    "[registry] tower {tower_id:?} floor {floor}: endorsement is NOK, rejecting"
                );
                return Err(RegistryError::VerificationRejected { floor });
            }
            Some(EndorsementStatus::Ok) => {}
            None => match self.config.absent_endorsement {
                AbsentEndorsementPolicy::RequireEndorsement => {
                    tracing::info!(
                        "[registry] tower {tower_id:?} floor {floor}: no endorsement on record, rejecting"
                    );
                    return Err(RegistryError::EndorsementMissing { floor });
                }
                AbsentEndorsementPolicy::TreatAsEndorsed => {
                    tracing::warn!(
                        "[registry] tower {tower_id:?} floor {floor}: no endorsement on record, policy passes the gate"
                    );
                }
            },
        }

        let mut homes_updated = 0usize;
        self.commit_with_retry("obtainCompletionVerification", |svc| {
            let (mut tower, tower_version) =
                svc.load_tower(tower_id)?
                    .ok_or_else(|| RegistryError::NotFound {
                        kind: "tower",
                        id: tower_id.to_string(),
                    })?;
            if floor < tower.completed_floor {
                tracing::warn!(
                    "[registry] tower {tower_id:?}: verifying floor {floor} below completed floor {}",
                    tower.completed_floor
                );
            }
            tower.record_verification(floor);

            let tower_key = KeyPrefix::tower_key(tower_id);
            let mut batch = WriteBatch::new();
            batch.expect(&tower_key, tower_version);
            batch.put(&tower_key, encode_tower(&tower)?);

            // Cascade: stage every home of this tower at the new status.
            // Decode of every scanned record must succeed before anything
            // is written.
            homes_updated = 0;
            for (key, value) in svc.ledger.prefix_scan(KeyPrefix::Home.as_str())? {
                if svc.cancel.is_cancelled() {
                    return Err(RegistryError::Cancelled);
                }

                let mut home = decode_home(&key, &value)?;
                if home.tower != tower_id {
                    continue;
                }
                home.build_status = HomeStatus::FloorCompleted(floor);

                let entry = svc.ledger.get_versioned(&key)?.ok_or_else(|| {
                    // Scanned a moment ago; only a concurrent delete could
                    // remove it, and homes are never deleted.
                    RegistryError::NotFound {
                        kind: "home",
                        id: key.clone(),
                    }
                })?;
                batch.expect(&key, entry.version);
                batch.put(&key, encode_home(&home)?);
                homes_updated += 1;
            }

            Ok(batch)
        })?;

        tracing::info!(
            "[registry] tower {tower_id:?} floor {floor} verified, {homes_updated} homes updated"
        );
        Ok(())
    }
}
