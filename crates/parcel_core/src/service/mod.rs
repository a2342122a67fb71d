//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repository calls into use-case level APIs.
//! - Keep callers decoupled from storage details.

pub mod parcel_service;
