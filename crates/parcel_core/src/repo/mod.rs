//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the parcel data access contract.
//! - Isolate SQLite query details from service callers.
//!
//! # Invariants
//! - Every operation is a single statement and its own implicit transaction.
//! - Storage errors are logged at the call site and returned unmodified.

pub mod parcel_repo;
