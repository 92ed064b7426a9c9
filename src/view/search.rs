//! Label search and the default entity listing

use super::ViewContext;
use crate::rdf::{NamedNode, RdfObject, RdfPredicate, RdfSubject, RDFS_LABEL, RDF_TYPE};
use serde::Serialize;

/// One search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Full IRI of the entity
    pub identifier: String,
    pub label: String,
    /// Local id used for entity links
    pub entity_id: String,
}

impl SearchHit {
    fn new(node: &NamedNode, label: String) -> Self {
        Self {
            identifier: node.as_str().to_string(),
            label,
            entity_id: node.local_name().to_string(),
        }
    }
}

/// Case-insensitive substring search over `rdfs:label` values. Blank node
/// subjects are skipped; results keep store order. An empty (or blank)
/// query lists every entity of the configured listing type instead.
pub fn search(ctx: ViewContext<'_>, query: &str) -> Vec<SearchHit> {
    let query = query.trim();
    if query.is_empty() {
        return list_entities(ctx);
    }

    let needle = query.to_lowercase();
    let label = RdfPredicate::new_unchecked(RDFS_LABEL);
    ctx.store
        .triples_with_predicate(&label)
        .filter(|t| t.object.lexical().to_lowercase().contains(&needle))
        .filter_map(|t| match &t.subject {
            RdfSubject::NamedNode(n) => Some(SearchHit::new(n, t.object.lexical().to_string())),
            RdfSubject::BlankNode(_) => None,
        })
        .collect()
}

/// Every named instance of the listing type, labeled
pub fn list_entities(ctx: ViewContext<'_>) -> Vec<SearchHit> {
    let Ok(class) = NamedNode::new(&ctx.config.listing_type) else {
        tracing::warn!("Listing type {} is not a valid IRI", ctx.config.listing_type);
        return Vec::new();
    };
    let class = RdfObject::NamedNode(class);
    let rdf_type = RdfPredicate::new_unchecked(RDF_TYPE);
    let labels = ctx.labels();

    ctx.store
        .instances_of(&rdf_type, &class)
        .map(|n| SearchHit::new(n, labels.resolve(&n.clone().into())))
        .collect()
}
