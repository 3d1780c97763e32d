//! Service metadata assembly.
//!
//! Three fields (service, revision, project) are fixed at startup from the
//! environment; the region is looked up per request from the cloud metadata
//! server. Every field falls back to `local` when its source is
//! unavailable, so the snapshot is always fully populated.

use reqwest::Client;
use tracing::warn;

use crate::config::{AppConfig, LOCAL_FALLBACK};
use crate::resolve::{LookupError, Resolved};

/// Deployment metadata snapshot rendered into a single response. Built
/// fresh per request, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub service: String,
    pub revision: String,
    pub project: String,
    pub region: String,
}

/// Resolves the metadata snapshot for each request.
#[derive(Debug)]
pub struct MetadataResolver {
    client: Client,
    region_url: String,
    service: String,
    revision: String,
    project: String,
}

impl MetadataResolver {
    pub fn new(config: &AppConfig, client: Client) -> Self {
        let region_url = format!(
            "{}/computeMetadata/v1/instance/region",
            config.metadata_server_url.trim_end_matches('/')
        );
        Self {
            client,
            region_url,
            service: config.service.clone(),
            revision: config.revision.clone(),
            project: config.project.clone(),
        }
    }

    /// Look up the deployment region from the metadata server.
    ///
    /// Single attempt, bounded by the shared client timeout, no retry. Any
    /// failure substitutes the `local` fallback.
    pub async fn region(&self) -> Resolved<String> {
        match self.fetch_region().await {
            Ok(region) => Resolved::Value(region),
            Err(err) => {
                warn!("region lookup failed, serving fallback: {}", err);
                Resolved::Fallback(LOCAL_FALLBACK.to_string())
            }
        }
    }

    async fn fetch_region(&self) -> Result<String, LookupError> {
        // The metadata server rejects callers that do not identify
        // themselves as metadata-protocol clients.
        let response = self
            .client
            .get(&self.region_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(LookupError::Empty);
        }
        Ok(body)
    }

    /// Merge the startup fields with a resolved region into one snapshot.
    pub fn assemble(&self, region: Resolved<String>) -> ServiceMetadata {
        ServiceMetadata {
            service: self.service.clone(),
            revision: self.revision.clone(),
            project: self.project.clone(),
            region: region.into_inner(),
        }
    }
}
