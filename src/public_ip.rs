//! Public IP lookup.
//!
//! Asks an external HTTP+JSON service which address this process is seen
//! as. One attempt per request, no retry; any failure substitutes the
//! `Unavailable` placeholder.

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::AppConfig;
use crate::resolve::{LookupError, Resolved};

/// Placeholder rendered when the lookup service cannot be reached.
pub const UNAVAILABLE: &str = "Unavailable";

/// Shape of the lookup service's JSON body.
#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// Resolves the caller-visible public IP.
#[derive(Debug)]
pub struct PublicIpResolver {
    client: Client,
    lookup_url: String,
}

impl PublicIpResolver {
    pub fn new(config: &AppConfig, client: Client) -> Self {
        let lookup_url = format!("{}?format=json", config.ip_lookup_url.trim_end_matches('/'));
        Self { client, lookup_url }
    }

    /// Ask the lookup service for the public IP, bounded by the shared
    /// client timeout.
    pub async fn lookup(&self) -> Resolved<String> {
        match self.fetch_ip().await {
            Ok(ip) => Resolved::Value(ip),
            Err(err) => {
                warn!("public IP lookup failed, serving fallback: {}", err);
                Resolved::Fallback(UNAVAILABLE.to_string())
            }
        }
    }

    async fn fetch_ip(&self) -> Result<String, LookupError> {
        let response = self.client.get(&self.lookup_url).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        let decoded: IpResponse = response.json().await?;
        if decoded.ip.is_empty() {
            return Err(LookupError::Empty);
        }
        Ok(decoded.ip)
    }
}
