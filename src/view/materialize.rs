//! Node-to-view materialization
//!
//! Walks the graph from a node and produces a serializable [`ViewNode`] tree.
//! Blank nodes are expanded depth-first; named resources become links;
//! literals become values. A visited set threaded through the whole descent
//! breaks cycles: re-entering a node yields [`ViewNode::Circular`]. Nesting
//! is capped at [`MAX_DEPTH`] blank nodes.

use super::{LabelResolver, ViewContext};
use crate::rdf::{BlankNode, RdfSubject, RdfTerm};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Property label -> values, in order of first appearance
pub type PropertyMap = IndexMap<String, Vec<ViewNode>>;

/// Node identities already entered during one traversal
pub type Visited = HashSet<RdfTerm>;

/// Rendered form of a graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ViewNode {
    /// Node already entered in this traversal
    Circular,
    /// Named resource
    Resource { value: String, link: ResourceLink },
    /// Expanded blank node
    Blank { properties: PropertyMap },
    /// Literal value
    Literal { value: String },
    /// Blank node nested deeper than [`MAX_DEPTH`], not expanded
    Truncated,
}

impl ViewNode {
    pub fn literal(value: impl Into<String>) -> Self {
        ViewNode::Literal { value: value.into() }
    }

    /// Number of circular markers in this subtree
    pub fn circular_count(&self) -> usize {
        match self {
            ViewNode::Circular => 1,
            ViewNode::Blank { properties } => properties
                .values()
                .flatten()
                .map(ViewNode::circular_count)
                .sum(),
            ViewNode::Resource { .. } | ViewNode::Literal { .. } | ViewNode::Truncated => 0,
        }
    }
}

/// Where a resource points to. The presentation layer turns an internal
/// entity id into a URL; external URIs are used as they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceLink {
    External { uri: String },
    Internal { entity_id: String },
}

/// Deepest nesting of blank nodes expanded below one value. A blank node
/// that would open a deeper level becomes [`ViewNode::Truncated`].
pub const MAX_DEPTH: usize = 128;

/// Blank node whose properties are being materialized
struct Frame {
    /// Property the finished node is attached to in its parent
    key: String,
    pending: std::vec::IntoIter<(String, RdfTerm)>,
    properties: PropertyMap,
}

/// Outcome of visiting one value
enum Step {
    Value(ViewNode),
    Enter(BlankNode),
}

/// Builds [`ViewNode`] trees
pub struct Materializer<'a> {
    ctx: ViewContext<'a>,
    labels: LabelResolver<'a>,
}

impl<'a> Materializer<'a> {
    pub fn new(ctx: ViewContext<'a>) -> Self {
        Self {
            ctx,
            labels: ctx.labels(),
        }
    }

    /// Materialize `node`, recording every entered named or blank node in
    /// `visited`. The same set must be passed through the whole descent.
    ///
    /// Blank nodes are expanded depth-first with an explicit stack, so long
    /// RDF collections do not grow the call stack.
    pub fn materialize(&self, node: &RdfTerm, visited: &mut Visited) -> ViewNode {
        match self.step(node, 0, visited) {
            Step::Value(value) => value,
            Step::Enter(blank) => self.expand(&blank, visited),
        }
    }

    /// Materialize with a fresh visited set
    pub fn materialize_root(&self, node: &RdfTerm) -> ViewNode {
        self.materialize(node, &mut Visited::new())
    }

    /// `depth` is the number of blank nodes currently open above `node`
    fn step(&self, node: &RdfTerm, depth: usize, visited: &mut Visited) -> Step {
        if visited.contains(node) {
            return Step::Value(ViewNode::Circular);
        }

        match node {
            RdfTerm::BlankNode(_) if depth >= MAX_DEPTH => Step::Value(ViewNode::Truncated),
            RdfTerm::BlankNode(b) => {
                visited.insert(node.clone());
                Step::Enter(b.clone())
            }
            RdfTerm::NamedNode(n) => {
                visited.insert(node.clone());
                let value = self.labels.resolve(node);
                let link = if self.ctx.config.is_external(n.as_str()) {
                    ResourceLink::External {
                        uri: n.as_str().to_string(),
                    }
                } else {
                    ResourceLink::Internal {
                        entity_id: n.local_name().to_string(),
                    }
                };
                Step::Value(ViewNode::Resource { value, link })
            }
            // Literals are values, not identities: equal literals under one
            // node are all shown.
            RdfTerm::Literal(l) => Step::Value(ViewNode::literal(l.value())),
        }
    }

    fn frame(&self, blank: &BlankNode, key: String) -> Frame {
        let subject = RdfSubject::BlankNode(blank.clone());
        let pending: Vec<(String, RdfTerm)> = self
            .ctx
            .store
            .predicate_objects(&subject)
            .map(|(predicate, object)| (self.labels.predicate_label(predicate), RdfTerm::from(object.clone())))
            .collect();
        Frame {
            key,
            pending: pending.into_iter(),
            properties: PropertyMap::new(),
        }
    }

    fn expand(&self, root: &BlankNode, visited: &mut Visited) -> ViewNode {
        let mut current = self.frame(root, String::new());
        let mut parents: Vec<Frame> = Vec::new();

        loop {
            match current.pending.next() {
                Some((key, object)) => match self.step(&object, parents.len() + 1, visited) {
                    Step::Value(value) => current.properties.entry(key).or_default().push(value),
                    Step::Enter(blank) => {
                        let child = self.frame(&blank, key);
                        parents.push(std::mem::replace(&mut current, child));
                    }
                },
                None => {
                    let node = ViewNode::Blank {
                        properties: std::mem::take(&mut current.properties),
                    };
                    match parents.pop() {
                        Some(parent) => {
                            let done = std::mem::replace(&mut current, parent);
                            current.properties.entry(done.key).or_default().push(node);
                        }
                        None => return node,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::rdf::{
        BlankNode, Literal, NamedNode, NamespaceManager, RdfPredicate, RdfStore, Triple,
        RDFS_LABEL,
    };

    const EX: &str = "http://example.org/mybase#";

    fn iri(local: &str) -> NamedNode {
        NamedNode::new(&format!("{EX}{local}")).unwrap()
    }

    fn pred(local: &str) -> RdfPredicate {
        iri(local).into()
    }

    fn blank(id: &str) -> BlankNode {
        BlankNode::with_id(id).unwrap()
    }

    struct Fixture {
        store: RdfStore,
        config: ViewerConfig,
        namespaces: NamespaceManager,
    }

    impl Fixture {
        fn new(triples: Vec<Triple>) -> Self {
            Self {
                store: RdfStore::from_triples(triples),
                config: ViewerConfig::default(),
                namespaces: NamespaceManager::new(),
            }
        }

        fn ctx(&self) -> ViewContext<'_> {
            ViewContext::new(&self.store, &self.config, &self.namespaces)
        }
    }

    #[test]
    fn test_literal_and_resources() {
        let bob = iri("bob");
        let fx = Fixture::new(vec![Triple::new(
            bob.clone().into(),
            RdfPredicate::new_unchecked(RDFS_LABEL),
            Literal::new_simple_literal("Bob").into(),
        )]);
        let m = Materializer::new(fx.ctx());

        assert_eq!(
            m.materialize_root(&bob.into()),
            ViewNode::Resource {
                value: "Bob".to_string(),
                link: ResourceLink::Internal { entity_id: "bob".to_string() },
            }
        );

        let q42 = NamedNode::new("http://www.wikidata.org/entity/Q42").unwrap();
        assert_eq!(
            m.materialize_root(&q42.into()),
            ViewNode::Resource {
                value: "Q42".to_string(),
                link: ResourceLink::External {
                    uri: "http://www.wikidata.org/entity/Q42".to_string()
                },
            }
        );

        assert_eq!(
            m.materialize_root(&Literal::new_simple_literal("1990").into()),
            ViewNode::literal("1990")
        );
    }

    #[test]
    fn test_blank_node_expansion_groups_repeated_predicates() {
        let address = blank("addr");
        let fx = Fixture::new(vec![
            Triple::new(address.clone().into(), pred("street"), Literal::new_simple_literal("Main St").into()),
            Triple::new(address.clone().into(), pred("phone"), Literal::new_simple_literal("111").into()),
            Triple::new(address.clone().into(), pred("phone"), Literal::new_simple_literal("222").into()),
        ]);
        let m = Materializer::new(fx.ctx());

        let ViewNode::Blank { properties } = m.materialize_root(&address.into()) else {
            panic!("expected blank node view");
        };
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["street", "phone"]);
        assert_eq!(properties["phone"], vec![ViewNode::literal("111"), ViewNode::literal("222")]);
    }

    #[test]
    fn test_acyclic_tree_has_no_circular_marker() {
        let outer = blank("outer");
        let inner = blank("inner");
        let fx = Fixture::new(vec![
            Triple::new(outer.clone().into(), pred("part"), inner.clone().into()),
            Triple::new(outer.clone().into(), pred("owner"), iri("alice").into()),
            Triple::new(inner.clone().into(), pred("value"), Literal::new_simple_literal("x").into()),
            Triple::new(inner.clone().into(), pred("again"), Literal::new_simple_literal("x").into()),
        ]);
        let m = Materializer::new(fx.ctx());

        let view = m.materialize_root(&outer.into());
        assert_eq!(view.circular_count(), 0);
    }

    #[test]
    fn test_blank_cycle_yields_single_circular_marker() {
        let a = blank("a");
        let b = blank("b");
        let fx = Fixture::new(vec![
            Triple::new(a.clone().into(), pred("next"), b.clone().into()),
            Triple::new(b.clone().into(), pred("next"), a.clone().into()),
        ]);
        let m = Materializer::new(fx.ctx());

        let view = m.materialize_root(&a.into());
        assert_eq!(view.circular_count(), 1);

        // a -> b -> circular
        let ViewNode::Blank { properties } = view else { panic!() };
        let ViewNode::Blank { properties: inner } = &properties["next"][0] else { panic!() };
        assert_eq!(inner["next"], vec![ViewNode::Circular]);
    }

    #[test]
    fn test_self_loop() {
        let a = blank("self");
        let fx = Fixture::new(vec![Triple::new(a.clone().into(), pred("me"), a.clone().into())]);
        let m = Materializer::new(fx.ctx());

        let ViewNode::Blank { properties } = m.materialize_root(&a.into()) else { panic!() };
        assert_eq!(properties["me"], vec![ViewNode::Circular]);
    }

    #[test]
    fn test_reentering_root_is_circular() {
        // alice knows bob, bob knows alice
        let alice = iri("alice");
        let bob = iri("bob");
        let fx = Fixture::new(vec![
            Triple::new(alice.clone().into(), pred("knows"), bob.clone().into()),
            Triple::new(bob.clone().into(), pred("knows"), alice.clone().into()),
        ]);
        let m = Materializer::new(fx.ctx());

        let mut visited = Visited::new();
        let root = m.materialize(&alice.clone().into(), &mut visited);
        assert!(matches!(root, ViewNode::Resource { .. }));

        let bob_view = m.materialize(&bob.into(), &mut visited);
        assert!(matches!(bob_view, ViewNode::Resource { .. }));

        assert_eq!(m.materialize(&alice.into(), &mut visited), ViewNode::Circular);
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_siblings_share_visited_markers() {
        let root = blank("root");
        let shared = blank("shared");
        let fx = Fixture::new(vec![
            Triple::new(root.clone().into(), pred("left"), shared.clone().into()),
            Triple::new(root.clone().into(), pred("right"), shared.clone().into()),
            Triple::new(shared.clone().into(), pred("v"), Literal::new_simple_literal("1").into()),
        ]);
        let m = Materializer::new(fx.ctx());

        let ViewNode::Blank { properties } = m.materialize_root(&root.into()) else { panic!() };
        assert!(matches!(properties["left"][0], ViewNode::Blank { .. }));
        assert_eq!(properties["right"], vec![ViewNode::Circular]);
    }

    /// Blank nodes `b0 -next-> b1 -next-> ...`, `len` of them
    fn chain_triples(len: usize) -> Vec<Triple> {
        let mut triples = Vec::new();
        for i in 0..len {
            let node = blank(&format!("b{i}"));
            triples.push(Triple::new(node.clone().into(), pred("v"), Literal::new_simple_literal(i.to_string()).into()));
            if i + 1 < len {
                triples.push(Triple::new(node.into(), pred("next"), blank(&format!("b{}", i + 1)).into()));
            }
        }
        triples
    }

    fn chain(len: usize) -> Fixture {
        Fixture::new(chain_triples(len))
    }

    /// Number of nested blank levels along `next`, and the node ending the chain
    fn walk(mut node: &ViewNode) -> (usize, &ViewNode) {
        let mut depth = 0;
        while let ViewNode::Blank { properties } = node {
            depth += 1;
            match properties.get("next") {
                Some(values) => node = &values[0],
                None => break,
            }
        }
        (depth, node)
    }

    #[test]
    fn test_chain_at_max_depth_is_complete() {
        let fx = chain(MAX_DEPTH);
        let m = Materializer::new(fx.ctx());

        let view = m.materialize_root(&blank("b0").into());
        let (depth, last) = walk(&view);
        assert_eq!(depth, MAX_DEPTH);
        assert!(matches!(last, ViewNode::Blank { .. }));
    }

    #[test]
    fn test_deep_chain_is_truncated() {
        let fx = chain(20_000);
        let m = Materializer::new(fx.ctx());

        let mut visited = Visited::new();
        let view = m.materialize(&blank("b0").into(), &mut visited);
        let (depth, last) = walk(&view);
        assert_eq!(depth, MAX_DEPTH);
        assert_eq!(last, &ViewNode::Truncated);
        assert_eq!(view.circular_count(), 0);
        // Truncated nodes were never entered
        assert_eq!(visited.len(), MAX_DEPTH);
    }

    #[test]
    fn test_deep_cycle_still_marked_circular() {
        let mut triples = chain_triples(10);
        triples.push(Triple::new(blank("b9").into(), pred("next"), blank("b0").into()));
        let fx = Fixture::new(triples);
        let m = Materializer::new(fx.ctx());

        let view = m.materialize_root(&blank("b0").into());
        let (depth, end) = walk(&view);
        assert_eq!(depth, 10);
        assert_eq!(end, &ViewNode::Circular);
    }

    #[test]
    fn test_json_shape() {
        let node = ViewNode::Resource {
            value: "Bob".to_string(),
            link: ResourceLink::Internal { entity_id: "bob".to_string() },
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "resource");
        assert_eq!(json["link"]["kind"], "internal");
        assert_eq!(json["link"]["entity_id"], "bob");

        assert_eq!(serde_json::to_value(ViewNode::Circular).unwrap()["type"], "circular");
        assert_eq!(serde_json::to_value(ViewNode::Truncated).unwrap()["type"], "truncated");
    }
}
