//! # Domain Entities
//!
//! Ledger record types for the registry.
//!
//! Homes and towers are persisted as JSON objects; field names match the
//! ledger layout other participants already read (`buildStatus`,
//! `builderPerc`, ...). Status fields are tagged enums in memory and encode
//! to the historical token strings on the wire, so a record written here is
//! byte-compatible with one written by any other participant.

use crate::domain::errors::RegistryError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// HOME
// =============================================================================

/// A purchasable unit inside a tower.
///
/// Identified by `name` (human-assigned, e.g. "101"). References its tower
/// by id only; the tower record does not know its homes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    pub name: String,
    pub tower: String,
    pub floor: u32,
    pub build_status: HomeStatus,
    pub builder_perc: u32,
    pub customer_perc: u32,
    pub customer: String,
}

impl Home {
    /// A freshly created, unbooked home: full builder share, no customer.
    pub fn new(name: impl Into<String>, tower: impl Into<String>, floor: u32) -> Self {
        Self {
            name: name.into(),
            tower: tower.into(),
            floor,
            build_status: HomeStatus::NotBooked,
            builder_perc: 100,
            customer_perc: 0,
            customer: String::new(),
        }
    }

    /// Ownership split must account for the whole home.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.builder_perc.checked_add(self.customer_perc) != Some(100) {
            return Err(RegistryError::InvalidOwnershipSplit {
                builder: self.builder_perc,
                customer: self.customer_perc,
            });
        }
        Ok(())
    }

    /// Record a booking: the home gets a customer and flips to `Booked`.
    pub fn book(&mut self, customer: impl Into<String>) {
        self.customer = customer.into();
        self.build_status = HomeStatus::Booked;
    }

    /// Adjust the builder/customer payment split.
    pub fn set_ownership_split(&mut self, builder: u32, customer: u32) -> Result<(), RegistryError> {
        if builder.checked_add(customer) != Some(100) {
            return Err(RegistryError::InvalidOwnershipSplit { builder, customer });
        }
        self.builder_perc = builder;
        self.customer_perc = customer;
        Ok(())
    }
}

/// Booking/completion state of a home.
///
/// One ledger field carries both the booking state and, once a floor is
/// verified, the completion marker; the tagged variant keeps the two apart
/// in memory while encoding to the historical strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeStatus {
    NotBooked,
    Booked,
    FloorCompleted(u32),
}

impl HomeStatus {
    /// The ledger token for this status.
    pub fn token(&self) -> String {
        match self {
            HomeStatus::NotBooked => "NotBooked".to_string(),
            HomeStatus::Booked => "Booked".to_string(),
            HomeStatus::FloorCompleted(floor) => format!("Floor {floor} Completed"),
        }
    }

    /// Parse a ledger token. Unknown tokens are `None`; callers surface that
    /// as a decode error rather than defaulting.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "NotBooked" => Some(HomeStatus::NotBooked),
            "Booked" => Some(HomeStatus::Booked),
            other => {
                let floor = other
                    .strip_prefix("Floor ")?
                    .strip_suffix(" Completed")?
                    .parse()
                    .ok()?;
                Some(HomeStatus::FloorCompleted(floor))
            }
        }
    }
}

impl fmt::Display for HomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl Serialize for HomeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for HomeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        HomeStatus::parse_token(&token)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown home status {token:?}")))
    }
}

// =============================================================================
// TOWER
// =============================================================================

/// A construction unit containing many homes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tower {
    pub id: String,
    pub completed_floor: u32,
    pub build_status: TowerStatus,
}

impl Tower {
    /// A tower before any completion has been reported.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            completed_floor: 0,
            build_status: TowerStatus::NotStarted,
        }
    }

    /// The builder reports a floor complete. Unconditional overwrite:
    /// repeating a notification is idempotent and no prior state is required.
    pub fn record_notification(&mut self, floor: u32) {
        self.completed_floor = floor;
        self.build_status = TowerStatus::CompletionNotified;
    }

    /// The floor passed the verification gate.
    pub fn record_verification(&mut self, floor: u32) {
        self.completed_floor = floor;
        self.build_status = TowerStatus::Verified;
    }
}

/// Construction status of a tower, encoded as the historical ledger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerStatus {
    #[serde(rename = "NS")]
    NotStarted,
    #[serde(rename = "COM")]
    CompletionNotified,
    #[serde(rename = "VER")]
    Verified,
}

// =============================================================================
// ENDORSEMENT
// =============================================================================

/// A bank's attestation that a tower's floor is complete.
///
/// Stored as a raw token (`OK` / `NOK`), not JSON; the asymmetry with
/// home/tower records is part of the ledger layout. Absence of a record
/// means no bank has acted yet and is distinct from `Nok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndorsementStatus {
    Ok,
    Nok,
}

impl EndorsementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndorsementStatus::Ok => "OK",
            EndorsementStatus::Nok => "NOK",
        }
    }

    /// Parse a status token; anything but `OK`/`NOK` is invalid.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "OK" => Some(EndorsementStatus::Ok),
            "NOK" => Some(EndorsementStatus::Nok),
            _ => None,
        }
    }
}

impl fmt::Display for EndorsementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// QUERY PAYLOAD
// =============================================================================

/// One row of the all-homes query: ledger key (bare home name) plus the
/// decoded record. Serializes to the `{"Key": ..., "Record": ...}` shape the
/// query consumers expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeRecord {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: Home,
}

// =============================================================================
// TESTS
// =============================================================================
