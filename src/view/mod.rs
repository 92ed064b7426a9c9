//! Entity views over the knowledge graph
//!
//! Turns graph nodes into render-ready trees:
//! - [`LabelResolver`]: human-readable labels with a fallback chain
//! - [`Materializer`]: recursive node expansion with cycle breaking
//! - [`EntityViewBuilder`]: root entity pages, optionally enriched from Wikidata
//! - [`search`]: label search and the default listing

mod entity;
mod label;
mod materialize;
mod search;

pub use entity::{
    literal_properties, EntityView, EntityViewBuilder, SameAsTarget, WIKIDATA_PROPERTY_PREFIX,
};
pub use label::{LabelResolver, ANONYMOUS_NODE};
pub use materialize::{Materializer, PropertyMap, ResourceLink, ViewNode, Visited, MAX_DEPTH};
pub use search::{list_entities, search, SearchHit};

use crate::config::ViewerConfig;
use crate::rdf::{NamespaceManager, RdfStore};
use thiserror::Error;

/// View errors
#[derive(Error, Debug)]
pub enum ViewError {
    /// Identifier resolves to no subject under any known namespace
    #[error("Entity not found: {0}")]
    NotFound(String),
}

pub type ViewResult<T> = Result<T, ViewError>;

/// Read-only inputs shared by every view component
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub store: &'a RdfStore,
    pub config: &'a ViewerConfig,
    pub namespaces: &'a NamespaceManager,
}

impl<'a> ViewContext<'a> {
    pub fn new(store: &'a RdfStore, config: &'a ViewerConfig, namespaces: &'a NamespaceManager) -> Self {
        Self {
            store,
            config,
            namespaces,
        }
    }

    pub fn labels(&self) -> LabelResolver<'a> {
        LabelResolver::new(self.store, self.namespaces)
    }
}
