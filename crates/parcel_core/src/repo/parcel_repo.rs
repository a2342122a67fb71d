//! Parcel store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create, lookup and guarded mutation APIs over the `parcel` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - All statements bind parameters by name; guard values are never
//!   interpolated into SQL text.
//! - Address edits and deletes only touch rows whose status is `registered`.
//! - Guarded operations do not report affected rows: "not found" and
//!   "wrong status" both succeed silently.

use crate::db::DbResult;
use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use log::{debug, error};
use rusqlite::{named_params, Connection, Row};

const PARCEL_SELECT_SQL: &str = "SELECT
    number,
    client,
    status,
    address,
    created_at
FROM parcel";

/// Repository interface for parcel persistence.
pub trait ParcelRepository {
    /// Inserts a parcel and returns its storage-assigned number.
    ///
    /// `parcel.number` is ignored.
    fn add(&self, parcel: &Parcel) -> DbResult<ParcelNumber>;
    /// Gets one parcel by number.
    ///
    /// A missing row surfaces as the engine's no-rows error, see
    /// `DbError::is_not_found`.
    fn get(&self, number: ParcelNumber) -> DbResult<Parcel>;
    /// Lists all parcels of one client, ordered by number. Empty is not an error.
    fn get_by_client(&self, client: ClientId) -> DbResult<Vec<Parcel>>;
    /// Overwrites status regardless of the current value.
    fn set_status(&self, number: ParcelNumber, status: &str) -> DbResult<()>;
    /// Overwrites address only while the parcel is `registered`.
    fn set_address(&self, number: ParcelNumber, address: &str) -> DbResult<()>;
    /// Deletes the parcel only while it is `registered`.
    fn delete(&self, number: ParcelNumber) -> DbResult<()>;
}

/// SQLite-backed parcel store.
pub struct SqliteParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteParcelStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ParcelRepository for SqliteParcelStore<'_> {
    fn add(&self, parcel: &Parcel) -> DbResult<ParcelNumber> {
        self.conn
            .execute(
                "INSERT INTO parcel (client, status, address, created_at)
                 VALUES (:client, :status, :address, :created_at);",
                named_params! {
                    ":client": parcel.client,
                    ":status": parcel.status.as_str(),
                    ":address": parcel.address.as_str(),
                    ":created_at": parcel.created_at.as_str(),
                },
            )
            .map_err(|err| log_failure("parcel_add", err))?;

        let number = self.conn.last_insert_rowid();
        debug!("event=parcel_add module=repo status=ok number={number}");
        Ok(number)
    }

    fn get(&self, number: ParcelNumber) -> DbResult<Parcel> {
        let parcel = self
            .conn
            .query_row(
                &format!("{PARCEL_SELECT_SQL} WHERE number = :number;"),
                named_params! { ":number": number },
                parse_parcel_row,
            )
            .map_err(|err| log_failure("parcel_get", err))?;
        Ok(parcel)
    }

    fn get_by_client(&self, client: ClientId) -> DbResult<Vec<Parcel>> {
        let query = || -> rusqlite::Result<Vec<Parcel>> {
            let mut stmt = self.conn.prepare(&format!(
                "{PARCEL_SELECT_SQL} WHERE client = :client ORDER BY number ASC;"
            ))?;
            let parcels = stmt
                .query_map(named_params! { ":client": client }, parse_parcel_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(parcels)
        };

        let parcels = query().map_err(|err| log_failure("parcel_get_by_client", err))?;
        debug!(
            "event=parcel_get_by_client module=repo status=ok count={}",
            parcels.len()
        );
        Ok(parcels)
    }

    fn set_status(&self, number: ParcelNumber, status: &str) -> DbResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE parcel SET status = :status WHERE number = :number;",
                named_params! { ":status": status, ":number": number },
            )
            .map_err(|err| log_failure("parcel_set_status", err))?;

        debug!("event=parcel_set_status module=repo status=ok number={number} changed={changed}");
        Ok(())
    }

    fn set_address(&self, number: ParcelNumber, address: &str) -> DbResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE parcel SET address = :address
                 WHERE number = :number AND status = :registered;",
                named_params! {
                    ":address": address,
                    ":number": number,
                    ":registered": ParcelStatus::Registered.as_str(),
                },
            )
            .map_err(|err| log_failure("parcel_set_address", err))?;

        debug!("event=parcel_set_address module=repo status=ok number={number} changed={changed}");
        Ok(())
    }

    fn delete(&self, number: ParcelNumber) -> DbResult<()> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM parcel WHERE number = :number AND status = :registered;",
                named_params! {
                    ":number": number,
                    ":registered": ParcelStatus::Registered.as_str(),
                },
            )
            .map_err(|err| log_failure("parcel_delete", err))?;

        debug!("event=parcel_delete module=repo status=ok number={number} changed={changed}");
        Ok(())
    }
}

fn parse_parcel_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: row.get("number")?,
        client: row.get("client")?,
        status: row.get("status")?,
        address: row.get("address")?,
        created_at: row.get("created_at")?,
    })
}

// No-rows on a point lookup is an expected outcome, not a storage failure.
fn log_failure(event: &str, err: rusqlite::Error) -> rusqlite::Error {
    if matches!(err, rusqlite::Error::QueryReturnedNoRows) {
        debug!("event={event} module=repo status=not_found");
    } else {
        error!("event={event} module=repo status=error error={err}");
    }
    err
}
