//! Wikidata integration
//!
//! Live enrichment of entity pages and the batch linking pass, both over the
//! public SPARQL query service.

pub mod client;
mod enricher;
mod linker;

pub use client::{SparqlClient, SparqlResults};
pub use enricher::{claims_to_properties, WikidataEnricher, MAX_RESULT_LIMIT, MIN_RESULT_LIMIT};
pub use linker::{LinkStats, WikidataLinker};

use crate::view::PropertyMap;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikidataError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Endpoint returned HTTP {0}")]
    Status(u16),
    #[error("Malformed SPARQL response: {0}")]
    Decode(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type WikidataResult<T> = Result<T, WikidataError>;

/// Source of extra properties for an entity known under an external id.
///
/// Implementations swallow their own failures: an unreachable or broken
/// source yields an empty map.
#[async_trait]
pub trait ExternalEnricher: Send + Sync {
    async fn fetch_external_properties(&self, external_id: &str) -> PropertyMap;
}

/// Enricher used when enrichment is disabled
pub struct NoopEnricher;

#[async_trait]
impl ExternalEnricher for NoopEnricher {
    async fn fetch_external_properties(&self, _external_id: &str) -> PropertyMap {
        PropertyMap::new()
    }
}
