//! AUR RPC and mirror status client
//!
//! This crate turns typed requests into AUR RPC queries and decodes the
//! responses into the records defined in `archapi-core`. It also fetches the
//! Arch Linux mirror status feed.
//!
//! Nothing here is global: build a [`Transport`] (usually [`HttpTransport`]),
//! share it between a [`RegistryClient`] and a [`MirrorClient`], and pass the
//! clients to whoever needs them.

pub mod api;
pub mod client;
pub mod config;
pub mod mirrors;
pub mod transport;

// Re-export main types
pub use api::{Query, QueryType, ResponseKind, RpcEnvelope, SearchBy, AUR_RPC_URL, RPC_VERSION};
pub use client::RegistryClient;
pub use config::{ClientConfig, ConfigError};
pub use mirrors::{MirrorClient, MIRROR_STATUS_URL};
pub use transport::{BoxFuture, HttpTransport, Transport, TransportResponse};

pub use archapi_core::{ArchApiError, ArchApiResult, Mirror, MirrorList, Package, PackageInfo};
