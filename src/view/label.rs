//! Human-readable labels for graph nodes

use crate::rdf::{NamespaceManager, RdfPredicate, RdfStore, RdfTerm, FOAF_NAME, RDFS_LABEL};

/// Label shown for blank nodes without a label or name
pub const ANONYMOUS_NODE: &str = "Anonymous Node";

/// Resolves labels with a fixed fallback chain:
/// `rdfs:label`, then `foaf:name`, then the IRI's local name, then a
/// sentinel for blank nodes. Literals label themselves.
#[derive(Debug, Clone)]
pub struct LabelResolver<'a> {
    store: &'a RdfStore,
    namespaces: &'a NamespaceManager,
    label: RdfPredicate,
    name: RdfPredicate,
}

impl<'a> LabelResolver<'a> {
    pub fn new(store: &'a RdfStore, namespaces: &'a NamespaceManager) -> Self {
        Self {
            store,
            namespaces,
            label: RdfPredicate::new_unchecked(RDFS_LABEL),
            name: RdfPredicate::new_unchecked(FOAF_NAME),
        }
    }

    /// Resolve the label of any node. Never fails.
    pub fn resolve(&self, node: &RdfTerm) -> String {
        if let Some(subject) = node.as_subject() {
            for predicate in [&self.label, &self.name] {
                if let Some(object) = self.store.objects(&subject, predicate).next() {
                    return object.lexical().to_string();
                }
            }
        }

        match node {
            RdfTerm::NamedNode(n) => n.local_name().to_string(),
            RdfTerm::BlankNode(_) => ANONYMOUS_NODE.to_string(),
            RdfTerm::Literal(l) => l.value().to_string(),
        }
    }

    /// Label used as a property key. Falls back to the compact IRI when the
    /// resolved label is empty, e.g. for `http://example.org/ns#`.
    pub fn predicate_label(&self, predicate: &RdfPredicate) -> String {
        let label = self.resolve(&RdfTerm::NamedNode(predicate.as_named_node().clone()));
        if label.is_empty() {
            self.namespaces.short_form(predicate.as_str())
        } else {
            label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{BlankNode, Literal, NamedNode, Triple};

    fn iri(s: &str) -> NamedNode {
        NamedNode::new(s).unwrap()
    }

    fn lit(s: &str) -> Literal {
        Literal::new_simple_literal(s)
    }

    #[test]
    fn test_label_wins() {
        let alice = iri("http://example.org/mybase#alice");
        let store = RdfStore::from_triples(vec![
            Triple::new(alice.clone().into(), RdfPredicate::new_unchecked(RDFS_LABEL), lit("Alice").into()),
        ]);
        let ns = NamespaceManager::new();
        let labels = LabelResolver::new(&store, &ns);

        assert_eq!(labels.resolve(&alice.into()), "Alice");
    }

    #[test]
    fn test_label_preferred_over_name() {
        let alice = iri("http://example.org/mybase#alice");
        // Name comes first in the document, label must still win
        let store = RdfStore::from_triples(vec![
            Triple::new(alice.clone().into(), RdfPredicate::new_unchecked(FOAF_NAME), lit("Ally").into()),
            Triple::new(alice.clone().into(), RdfPredicate::new_unchecked(RDFS_LABEL), lit("Alice").into()),
        ]);
        let ns = NamespaceManager::new();
        let labels = LabelResolver::new(&store, &ns);

        assert_eq!(labels.resolve(&alice.into()), "Alice");
    }

    #[test]
    fn test_name_used_without_label() {
        let blank = BlankNode::new();
        let store = RdfStore::from_triples(vec![
            Triple::new(blank.clone().into(), RdfPredicate::new_unchecked(FOAF_NAME), lit("Carol").into()),
        ]);
        let ns = NamespaceManager::new();
        let labels = LabelResolver::new(&store, &ns);

        assert_eq!(labels.resolve(&blank.into()), "Carol");
    }

    #[test]
    fn test_fallbacks() {
        let store = RdfStore::new();
        let ns = NamespaceManager::new();
        let labels = LabelResolver::new(&store, &ns);

        assert_eq!(labels.resolve(&iri("http://example.org/mybase#bob").into()), "bob");
        assert_eq!(labels.resolve(&iri("http://example.org/people/carol").into()), "carol");
        assert_eq!(labels.resolve(&BlankNode::new().into()), ANONYMOUS_NODE);
        assert_eq!(labels.resolve(&lit("42").into()), "42");
    }

    #[test]
    fn test_predicate_label_falls_back_to_compact_form() {
        let store = RdfStore::new();
        let ns = NamespaceManager::new();
        let labels = LabelResolver::new(&store, &ns);

        let knows = RdfPredicate::new("http://xmlns.com/foaf/0.1/knows").unwrap();
        assert_eq!(labels.predicate_label(&knows), "knows");

        let bare = RdfPredicate::new("http://xmlns.com/foaf/0.1/").unwrap();
        assert_eq!(labels.predicate_label(&bare), "foaf:");

        let unknown = RdfPredicate::new("http://unknown.example/").unwrap();
        assert_eq!(labels.predicate_label(&unknown), "<http://unknown.example/>");
    }
}
