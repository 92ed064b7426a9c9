//! Rewrites `owl:sameAs` links that were stored as URI-shaped literals into
//! proper IRI objects.

use super::{NamedNode, RdfObject, RdfPredicate, RdfStore, Triple, OWL_SAME_AS};
use tracing::{debug, info};

/// Replace every literal `owl:sameAs` object that is an `http(s)://` IRI with
/// the corresponding named node. Returns the number of rewritten triples.
pub fn normalize_same_as(store: &RdfStore) -> (RdfStore, usize) {
    let same_as = RdfPredicate::new_unchecked(OWL_SAME_AS);
    let mut rewritten = 0;

    let triples = store.iter().map(|triple| {
        if triple.predicate != same_as {
            return triple.clone();
        }
        match uri_literal(&triple.object) {
            Some(target) => {
                debug!("Rewriting {} -> {}", triple, target);
                rewritten += 1;
                Triple::new(triple.subject.clone(), triple.predicate.clone(), target.into())
            }
            None => triple.clone(),
        }
    });
    let normalized = RdfStore::from_triples(triples.collect::<Vec<_>>());

    info!("Normalized {} owl:sameAs literal(s)", rewritten);
    (normalized, rewritten)
}

fn uri_literal(object: &RdfObject) -> Option<NamedNode> {
    match object {
        RdfObject::Literal(l)
            if l.value().starts_with("http://") || l.value().starts_with("https://") =>
        {
            NamedNode::new(l.value()).ok()
        }
        _ => None,
    }
}
