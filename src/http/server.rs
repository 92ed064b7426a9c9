//! HTTP server for the viewer pages and JSON API

use super::handler::{
    api_entity_handler, api_search_handler, entity_handler, index_handler, static_handler,
    status_handler,
};
use crate::config::ViewerConfig;
use crate::rdf::{NamespaceManager, RdfStore};
use crate::view::ViewContext;
use crate::wikidata::ExternalEnricher;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared, read-only state of every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RdfStore>,
    pub config: Arc<ViewerConfig>,
    pub namespaces: Arc<NamespaceManager>,
    pub enricher: Arc<dyn ExternalEnricher>,
}

impl AppState {
    pub fn new(store: RdfStore, config: ViewerConfig, enricher: Arc<dyn ExternalEnricher>) -> Self {
        let mut namespaces = NamespaceManager::new();
        namespaces.add_prefix("base", config.primary_namespace.clone());
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            namespaces: Arc::new(namespaces),
            enricher,
        }
    }

    pub fn context(&self) -> ViewContext<'_> {
        ViewContext::new(&self.store, &self.config, &self.namespaces)
    }
}

/// Routes of the viewer
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/entity/*entity_id", get(entity_handler))
        .route("/api/search", get(api_search_handler))
        .route("/api/entity/*entity_id", get(api_entity_handler))
        .route("/api/status", get(status_handler))
        .route("/static/*path", get(static_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server serving one immutable graph
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = format!("{}:{}", self.state.config.address, self.state.config.port);
        let app = router(self.state.clone());
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(
            "Serving {} triples at http://{}",
            self.state.store.len(),
            addr
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}
