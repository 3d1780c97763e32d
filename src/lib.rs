//! instance-info
//!
//! Minimal HTTP responder reporting Cloud Run service metadata (service,
//! revision, project, region) and the caller-visible public IP as fixed
//! plain text. One responder serves every method and path; every lookup
//! substitutes a documented fallback instead of failing the request.

pub mod config;
pub mod handler;
pub mod metadata;
pub mod public_ip;
pub mod resolve;

pub use config::AppConfig;
pub use handler::{router, AppState};
pub use metadata::{MetadataResolver, ServiceMetadata};
pub use public_ip::PublicIpResolver;
pub use resolve::{LookupError, Resolved};
