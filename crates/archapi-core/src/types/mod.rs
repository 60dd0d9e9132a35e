//! Data records decoded from the remote services.
//!
//! - `package`: AUR search and info results
//! - `mirror`: mirror status feed

pub mod mirror;
pub mod package;

// Re-export all public types
pub use mirror::{Mirror, MirrorList};
pub use package::{OutOfDate, Package, PackageInfo};
