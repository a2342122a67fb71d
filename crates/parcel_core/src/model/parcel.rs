//! Parcel domain model.
//!
//! # Responsibility
//! - Define the canonical parcel record persisted in the `parcel` table.
//! - Provide the known status vocabulary and the `registered` guard check.
//!
//! # Invariants
//! - `number` is assigned by storage and never reused for another parcel.
//! - Only `status` and `address` change after creation.
//! - `address` edits and deletion are allowed only while status is `registered`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage-assigned parcel tracking number.
pub type ParcelNumber = i64;

/// External client identity. Not validated by core.
pub type ClientId = i64;

/// Status values known to core.
///
/// Storage keeps status as free text, so values outside this set may be
/// written and read back; they simply do not match any variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Accepted but not handed to a carrier. Address edits and delete allowed.
    Registered,
    /// In transit.
    Sent,
    /// Handed to the recipient.
    Delivered,
}

impl ParcelStatus {
    /// Returns the persisted text form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl Display for UnknownStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown parcel status `{}`", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for ParcelStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "registered" => Ok(Self::Registered),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Canonical parcel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Tracking number. `0` until the parcel has been stored.
    pub number: ParcelNumber,
    pub client: ClientId,
    /// Free-form status text, see `ParcelStatus` for known values.
    pub status: String,
    pub address: String,
    /// RFC3339 timestamp text, stored verbatim.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved parcel (`number == 0`).
    pub fn new(
        client: ClientId,
        status: ParcelStatus,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: status.as_str().to_string(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Parses `status` into a known value, if it is one.
    pub fn known_status(&self) -> Option<ParcelStatus> {
        self.status.parse().ok()
    }

    /// Returns whether address edits and deletion are currently allowed.
    pub fn is_registered(&self) -> bool {
        self.status == ParcelStatus::Registered.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::{Parcel, ParcelStatus, UnknownStatus};

    #[test]
    fn status_text_roundtrips_through_from_str() {
        for status in [
            ParcelStatus::Registered,
            ParcelStatus::Sent,
            ParcelStatus::Delivered,
        ] {
            assert_eq!(status.as_str().parse::<ParcelStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected_by_parse_but_kept_on_parcel() {
        let err = "lost".parse::<ParcelStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("lost".to_string()));

        let mut parcel = Parcel::new(7, ParcelStatus::Sent, "somewhere", "2024-01-01T00:00:00Z");
        parcel.status = "lost".to_string();
        assert_eq!(parcel.known_status(), None);
        assert!(!parcel.is_registered());
    }

    #[test]
    fn new_parcel_is_unsaved_and_registered() {
        let parcel = Parcel::new(
            1000,
            ParcelStatus::Registered,
            "test",
            "2024-01-01T00:00:00Z",
        );
        assert_eq!(parcel.number, 0);
        assert_eq!(parcel.status, "registered");
        assert!(parcel.is_registered());
    }
}
