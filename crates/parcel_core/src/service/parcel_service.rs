//! Parcel use-case service.
//!
//! # Responsibility
//! - Provide parcel entry points that fill in creation defaults.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository guard rules.
//! - No status transition table is enforced; any known status may be set.

use crate::db::DbResult;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::ParcelRepository;
use chrono::{SecondsFormat, Utc};
use log::info;

/// Use-case service wrapper for parcel operations.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client`.
    ///
    /// # Contract
    /// - Status is `registered`.
    /// - `created_at` is the current UTC time in RFC3339 with second precision.
    /// - Returns the stored parcel including its assigned number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> DbResult<Parcel> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut parcel = Parcel::new(client, ParcelStatus::Registered, address, created_at);
        parcel.number = self.repo.add(&parcel)?;

        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    pub fn get(&self, number: ParcelNumber) -> DbResult<Parcel> {
        self.repo.get(number)
    }

    pub fn list_for_client(&self, client: ClientId) -> DbResult<Vec<Parcel>> {
        self.repo.get_by_client(client)
    }

    pub fn set_status(&self, number: ParcelNumber, status: ParcelStatus) -> DbResult<()> {
        self.repo.set_status(number, status.as_str())
    }

    /// Changes the address of a `registered` parcel.
    ///
    /// Returns `Ok(())` without changes when the parcel is missing or no
    /// longer `registered`.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> DbResult<()> {
        self.repo.set_address(number, address)
    }

    /// Deletes a `registered` parcel. Same silent no-op rule as `change_address`.
    pub fn delete(&self, number: ParcelNumber) -> DbResult<()> {
        self.repo.delete(number)
    }
}
