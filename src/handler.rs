//! Request handling.
//!
//! Every method on every path produces the same plain-text report: a
//! greeting, the public IP, and the four metadata fields. The two network
//! lookups are independent, so they are issued concurrently; if the client
//! disconnects, axum drops the handler future and both in-flight calls are
//! cancelled with it.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, Uri};
use axum::routing::any;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::metadata::{MetadataResolver, ServiceMetadata};
use crate::public_ip::PublicIpResolver;

/// Shared per-process state handed to every request. Requests share the
/// resolvers (and their HTTP client) but no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<MetadataResolver>,
    pub public_ip: Arc<PublicIpResolver>,
}

/// Build the application router: `/` and every unmatched path serve the
/// same responder, regardless of method.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(instance_info))
        .fallback(instance_info)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn instance_info(State(state): State<AppState>, method: Method, uri: Uri) -> String {
    debug!("{} {}", method, uri);

    let (region, public_ip) = tokio::join!(state.metadata.region(), state.public_ip.lookup());
    let metadata = state.metadata.assemble(region);

    render(&metadata, public_ip.get())
}

fn render(metadata: &ServiceMetadata, public_ip: &str) -> String {
    format!(
        "Hello World!\nPublic IP: {}\nService Metadata:\n- Service: {}\n- Revision: {}\n- Project: {}\n- Region: {}\n",
        public_ip, metadata.service, metadata.revision, metadata.project, metadata.region
    )
}
