//! # archapi-core
//!
//! Core types and errors shared across the archapi crates.
//!
//! This crate provides:
//! - `Package` and `PackageInfo` records decoded from the AUR RPC interface
//! - `MirrorList` and `Mirror` records decoded from the mirror status feed
//! - `ArchApiError`, the error taxonomy every client operation reports through
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: passive data records (no network behaviour)
//! - `error`: error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ArchApiError, ArchApiResult, DecodeStage, Operation, TransportError};
pub use types::{Mirror, MirrorList, OutOfDate, Package, PackageInfo};
