//! Ultrahuman client - typed access to the Ultrahuman partner API
//!
//! Fetches daily biometric metrics and decodes them into typed records:
//! request (date or epoch range) → raw JSON body → validated envelope →
//! tagged metric entries resolved into their concrete shapes.
//!
//! ## Modules
//!
//! - **Request layer**: [`request`], [`transport`], [`client`]
//! - **Response decoder**: [`schema`], [`decoder`]
//!
//! Entries whose tag is unknown, or whose payload doesn't match the schema for
//! its tag, are kept as raw JSON ([`MetricPayload::Untyped`]) instead of
//! failing the whole response.

pub mod client;
pub mod config;
pub mod credentials;
pub mod decoder;
pub mod error;
pub mod request;
pub mod schema;
pub mod transport;
pub mod types;

pub use client::UltrahumanClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use credentials::{ApiKey, CredentialSource, EnvCredentials};
pub use decoder::{decode, decode_envelope};
pub use error::ApiError;
pub use request::{DailyMetricsRequest, Selector};
pub use schema::{
    MetricData, MetricEntry, MetricKind, MetricPayload, MetricValue, UltrahumanData,
    UltrahumanResponse,
};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};

/// Crate version
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");
