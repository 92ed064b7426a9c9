//! RDF namespace and prefix management
//!
//! This module handles namespace prefixes for compact IRI notation, and the
//! handful of vocabulary terms the viewer reads.

use indexmap::IndexMap;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const FOAF_NS: &str = "http://xmlns.com/foaf/0.1/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";
pub const OWL_SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";

/// Wikidata entity namespace (`wd:` prefix)
pub const WIKIDATA_ENTITY_NS: &str = "http://www.wikidata.org/entity/";

/// Namespace manager with common prefixes
///
/// Prefixes are tried in registration order when compacting, so a more
/// specific namespace registered first wins over a broader one.
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    /// Prefix → IRI mappings
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with common prefixes
    pub fn new() -> Self {
        let mut mgr = Self {
            prefixes: IndexMap::new(),
        };

        mgr.add_prefix("rdf", RDF_NS);
        mgr.add_prefix("rdfs", RDFS_NS);
        mgr.add_prefix("xsd", "http://www.w3.org/2001/XMLSchema#");
        mgr.add_prefix("owl", OWL_NS);
        mgr.add_prefix("foaf", FOAF_NS);
        mgr.add_prefix("dc", "http://purl.org/dc/elements/1.1/");
        mgr.add_prefix("dcterms", "http://purl.org/dc/terms/");
        mgr.add_prefix("wd", WIKIDATA_ENTITY_NS);

        mgr
    }

    /// Add a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Compact an IRI using known prefixes
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.prefixes.iter().find_map(|(prefix, namespace_iri)| {
            iri.strip_prefix(namespace_iri.as_str())
                .map(|local| format!("{}:{}", prefix, local))
        })
    }

    /// Compact form of an IRI, or `<iri>` when no prefix applies
    pub fn short_form(&self, iri: &str) -> String {
        self.compact(iri).unwrap_or_else(|| format!("<{}>", iri))
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact() {
        let mgr = NamespaceManager::new();

        assert_eq!(mgr.compact(FOAF_NAME), Some("foaf:name".to_string()));
        assert_eq!(mgr.compact(OWL_SAME_AS), Some("owl:sameAs".to_string()));
        assert_eq!(mgr.compact(RDF_TYPE), Some("rdf:type".to_string()));
        assert_eq!(mgr.compact(&format!("{RDFS_NS}label")), Some("rdfs:label".to_string()));
        assert_eq!(mgr.compact("http://unknown.example/x"), None);
    }

    #[test]
    fn test_short_form_falls_back_to_angle_brackets() {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("base", "http://example.org/mybase#");

        assert_eq!(mgr.short_form("http://example.org/mybase#"), "base:");
        assert_eq!(mgr.short_form("http://other.example/"), "<http://other.example/>");
    }
}
