//! ttlview
//!
//! A small web viewer over a static RDF knowledge graph. A Turtle file is
//! loaded once at startup; entities are resolved by identifier, rendered with
//! their properties (blank nodes expanded inline, cycles broken), searched by
//! label, and optionally enriched with live data from the Wikidata SPARQL
//! endpoint by following `owl:sameAs` links.
//!
//! # Layout
//!
//! - [`rdf`]: terms, the read-only triple store, Turtle I/O, namespaces
//! - [`view`]: label resolution, node materialization, entity views, search
//! - [`wikidata`]: SPARQL client, live enricher, batch label linker
//! - [`http`]: axum routes rendering HTML pages and JSON
//! - [`config`]: YAML/flag configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use ttlview::config::ViewerConfig;
//! use ttlview::rdf::{NamespaceManager, RdfFormat, RdfParser, RdfStore};
//! use ttlview::view::{EntityViewBuilder, ViewContext};
//!
//! let triples = RdfParser::parse(
//!     r#"@prefix base: <http://example.org/mybase#> .
//!        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!        base:alice rdfs:label "Alice" ; base:knows base:bob ."#,
//!     RdfFormat::Turtle,
//! ).unwrap();
//! let store = RdfStore::from_triples(triples);
//! let config = ViewerConfig::default();
//! let namespaces = NamespaceManager::new();
//!
//! let builder = EntityViewBuilder::new(ViewContext::new(&store, &config, &namespaces));
//! let view = builder.build_local("alice").unwrap();
//! assert_eq!(view.label, "Alice");
//! assert!(view.properties.contains_key("knows"));
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod http;
pub mod rdf;
pub mod view;
pub mod wikidata;

pub use config::{ConfigError, ViewerConfig, WikidataConfig};

pub use rdf::{
    BlankNode, Literal, NamedNode, NamespaceManager, RdfObject, RdfParser, RdfPredicate,
    RdfSerializer, RdfStore, RdfSubject, RdfTerm, Triple,
};

pub use view::{
    EntityView, EntityViewBuilder, LabelResolver, Materializer, SearchHit, ViewContext,
    ViewError, ViewNode,
};

pub use wikidata::{ExternalEnricher, NoopEnricher, WikidataEnricher};

pub use http::{AppState, HttpServer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }
}
