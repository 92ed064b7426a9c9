//! One-shot pass linking labeled entities to Wikidata items
//!
//! For every `rdfs:label` literal, the first Wikidata item carrying the same
//! English label is recorded as an `owl:sameAs` literal. A later
//! [`normalize_same_as`](crate::rdf::normalize_same_as) pass turns those
//! literals into IRIs.

use super::client::{escape_literal, SparqlClient, SparqlResults};
use super::WikidataResult;
use crate::rdf::{Literal, RdfObject, RdfPredicate, RdfStore, Triple, OWL_SAME_AS, RDFS_LABEL};
use tracing::{info, warn};

/// Outcome of a linking run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub labels_seen: usize,
    pub links_added: usize,
    pub lookups_failed: usize,
}

/// Query for the item whose English label is exactly `label`
pub fn label_query(label: &str) -> String {
    format!(
        "SELECT ?item WHERE {{\n  ?item <{RDFS_LABEL}> \"{}\"@en .\n}}\nLIMIT 1",
        escape_literal(label)
    )
}

/// First `item` binding of a lookup response
pub fn first_item(results: &SparqlResults) -> Option<String> {
    results
        .results
        .bindings
        .first()
        .and_then(|b| b.get("item"))
        .map(|v| v.value.clone())
}

pub struct WikidataLinker {
    client: SparqlClient,
}

impl WikidataLinker {
    pub fn new(client: SparqlClient) -> Self {
        Self { client }
    }

    /// Wikidata item URI with the given English label, if any
    pub async fn lookup(&self, label: &str) -> WikidataResult<Option<String>> {
        let results = self.client.select(&label_query(label)).await?;
        Ok(first_item(&results))
    }

    /// Copy of `store` with `owl:sameAs` literals added for every label that
    /// matched. Failed lookups are logged and skipped.
    pub async fn link(&self, store: &RdfStore) -> (RdfStore, LinkStats) {
        let label = RdfPredicate::new_unchecked(RDFS_LABEL);
        let same_as = RdfPredicate::new_unchecked(OWL_SAME_AS);
        let mut linked = store.clone();
        let mut stats = LinkStats::default();

        for triple in store.triples_with_predicate(&label) {
            let RdfObject::Literal(text) = &triple.object else {
                continue;
            };
            stats.labels_seen += 1;

            match self.lookup(text.value()).await {
                Ok(Some(uri)) => {
                    info!("Linking {} to {}", text.value(), uri);
                    let link = Triple::new(
                        triple.subject.clone(),
                        same_as.clone(),
                        Literal::new_simple_literal(uri).into(),
                    );
                    if linked.insert(link).is_ok() {
                        stats.links_added += 1;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Lookup for {:?} failed: {}", text.value(), e);
                    stats.lookups_failed += 1;
                }
            }
        }

        (linked, stats)
    }
}
