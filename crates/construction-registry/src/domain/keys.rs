//! # Key Layout
//!
//! Every entity type lives under its own key prefix, so a scan over one
//! namespace can never pick up records of another. Endorsements use a
//! composite key (`endorsement~<tower>~<floor>~<bank>`) because their
//! identity spans three fields.

use ledger_store::{composite_key, LedgerError};

/// Key prefixes for the JSON record namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Home records: `home:{name}`
    Home,
    /// Tower records: `tower:{id}`
    Tower,
}

impl KeyPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyPrefix::Home => "home:",
            KeyPrefix::Tower => "tower:",
        }
    }

    /// Build a full key for an id in this namespace.
    pub fn key(&self, id: &str) -> String {
        format!("{}{}", self.as_str(), id)
    }

    /// Recover the bare id from a full key of this namespace.
    pub fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.as_str())
    }

    pub fn home_key(id: &str) -> String {
        KeyPrefix::Home.key(id)
    }

    pub fn tower_key(id: &str) -> String {
        KeyPrefix::Tower.key(id)
    }
}

/// Namespace for endorsement composite keys.
pub const ENDORSEMENT_NAMESPACE: &str = "endorsement";

/// Composite key for a bank's endorsement of a (tower, floor).
///
/// The floor is rendered in canonical decimal, so `"01"` and `"1"` from the
/// wire address the same endorsement once parsed.
pub fn endorsement_key(tower: &str, floor: u32, bank: &str) -> Result<String, LedgerError> {
    composite_key(ENDORSEMENT_NAMESPACE, &[tower, &floor.to_string(), bank])
}
