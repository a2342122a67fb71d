//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `parcel_core` linkage and schema bootstrap without a host app.
//! - Run one register/read/delete round trip on an in-memory database.

use parcel_core::{open_db_in_memory, ParcelService, SqliteParcelStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("parcel_core version={}", parcel_core::core_version());

    match smoke() {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("parcel_core smoke=failed error={err}");
            ExitCode::FAILURE
        }
    }
}

fn smoke() -> parcel_core::DbResult<String> {
    let conn = open_db_in_memory()?;
    let service = ParcelService::new(SqliteParcelStore::new(&conn));

    let parcel = service.register(1000, "smoke test address")?;
    let loaded = service.get(parcel.number)?;
    service.delete(parcel.number)?;
    let gone = service.get(parcel.number).is_err_and(|err| err.is_not_found());

    Ok(format!(
        "parcel_core smoke=ok number={} status={} deleted={}",
        loaded.number, loaded.status, gone
    ))
}
