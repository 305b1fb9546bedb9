//! Typed ledger access: encode/decode of domain records and versioned reads
//! for commit guards. All JSON crossing the ledger boundary goes through
//! here so decode failures surface uniformly as `RecordDecode`.

use super::RegistryService;
use crate::domain::entities::{EndorsementStatus, Home, Tower};
use crate::domain::errors::RegistryError;
use crate::domain::keys::{endorsement_key, KeyPrefix};
use crate::ports::outbound::LedgerStore;

impl<L: LedgerStore> RegistryService<L> {
    /// Load a home with the version its commit guard should expect.
    pub(crate) fn load_home(&self, id: &str) -> Result<Option<(Home, u64)>, RegistryError> {
        let key = KeyPrefix::home_key(id);
        match self.ledger.get_versioned(&key)? {
            Some(entry) => {
                let home = decode_home(&key, &entry.value)?;
                Ok(Some((home, entry.version)))
            }
            None => Ok(None),
        }
    }

    /// Load a tower with the version its commit guard should expect.
    pub(crate) fn load_tower(&self, id: &str) -> Result<Option<(Tower, u64)>, RegistryError> {
        let key = KeyPrefix::tower_key(id);
        match self.ledger.get_versioned(&key)? {
            Some(entry) => {
                let tower = decode_tower(&key, &entry.value)?;
                Ok(Some((tower, entry.version)))
            }
            None => Ok(None),
        }
    }

    /// Read the configured bank's endorsement of a (tower, floor).
    ///
    /// `None` means no bank has acted yet; an empty stored value reads the
    /// same way. A present token that is neither `OK` nor `NOK` is corrupt.
    pub(crate) fn load_endorsement(
        &self,
        tower_id: &str,
        floor: u32,
    ) -> Result<Option<EndorsementStatus>, RegistryError> {
        let key = endorsement_key(tower_id, floor, &self.config.endorsing_bank)?;
        let Some(bytes) = self.ledger.get(&key)? else {
            return Ok(None);
        };
        if bytes.is_empty() {
            return Ok(None);
        }
        let token = std::str::from_utf8(&bytes).map_err(|_| RegistryError::RecordDecode {
            key: key.clone(),
            reason: "endorsement token is not valid UTF-8".to_string(),
        })?;
        EndorsementStatus::parse_token(token)
            .map(Some)
            .ok_or_else(|| RegistryError::RecordDecode {
                key,
                reason: format!("unknown endorsement token {token:?}"),
            })
    }
}

/// Encode a home for writing, enforcing the ownership-split invariant.
pub(crate) fn encode_home(home: &Home) -> Result<Vec<u8>, RegistryError> {
    home.validate()?;
    serde_json::to_vec(home).map_err(|e| RegistryError::RecordEncode {
        kind: "home",
        reason: e.to_string(),
    })
}

pub(crate) fn encode_tower(tower: &Tower) -> Result<Vec<u8>, RegistryError> {
    serde_json::to_vec(tower).map_err(|e| RegistryError::RecordEncode {
        kind: "tower",
        reason: e.to_string(),
    })
}

pub(crate) fn decode_home(key: &str, bytes: &[u8]) -> Result<Home, RegistryError> {
    serde_json::from_slice(bytes).map_err(|e| RegistryError::RecordDecode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn decode_tower(key: &str, bytes: &[u8]) -> Result<Tower, RegistryError> {
    serde_json::from_slice(bytes).map_err(|e| RegistryError::RecordDecode {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
