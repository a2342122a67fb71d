//! Domain model for tracked parcels.
//!
//! # Responsibility
//! - Define the canonical parcel record shared by store and service layers.
//! - Name the status values that core logic refers to.
//!
//! # Invariants
//! - Every stored parcel is identified by a storage-assigned `ParcelNumber`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod parcel;
