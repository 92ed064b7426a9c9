//! RDF triple store implementation
//!
//! This module provides an in-memory RDF store indexed by subject and
//! predicate. Triples keep the order in which they were inserted, which for a
//! loaded document is the order of the Turtle file.

use super::types::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// RDF store errors
#[derive(Error, Debug)]
pub enum RdfStoreError {
    /// Duplicate triple
    #[error("Duplicate triple")]
    DuplicateTriple,
}

pub type RdfStoreResult<T> = Result<T, RdfStoreError>;

/// RDF triple store with subject and predicate indices
///
/// Indices hold positions into the primary triple set, so every lookup
/// enumerates triples in insertion order.
#[derive(Clone, Debug, Default)]
pub struct RdfStore {
    /// All triples (primary storage, insertion-ordered)
    triples: IndexSet<Triple>,

    /// Subject -> positions of its triples
    subject_index: IndexMap<RdfSubject, Vec<usize>>,

    /// Predicate -> positions of its triples
    predicate_index: IndexMap<RdfPredicate, Vec<usize>>,
}

impl RdfStore {
    /// Create a new empty RDF store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a sequence of triples, collapsing duplicates
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::new();
        for triple in triples {
            // Duplicates in a document are legal and carry no information
            let _ = store.insert(triple);
        }
        store
    }

    /// Insert a triple into the store
    pub fn insert(&mut self, triple: Triple) -> RdfStoreResult<()> {
        if self.triples.contains(&triple) {
            return Err(RdfStoreError::DuplicateTriple);
        }

        let position = self.triples.len();
        self.subject_index
            .entry(triple.subject.clone())
            .or_default()
            .push(position);
        self.predicate_index
            .entry(triple.predicate.clone())
            .or_default()
            .push(position);
        self.triples.insert(triple);

        Ok(())
    }

    /// Check whether a node is the subject of at least one triple
    pub fn has_subject(&self, subject: &RdfSubject) -> bool {
        self.subject_index.contains_key(subject)
    }

    /// Get the total number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get an iterator over all triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get triples with a specific subject
    pub fn triples_with_subject<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.positions(self.subject_index.get(subject))
    }

    /// Get triples with a specific predicate
    pub fn triples_with_predicate<'a>(
        &'a self,
        predicate: &RdfPredicate,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.positions(self.predicate_index.get(predicate))
    }

    /// (predicate, object) pairs of a subject
    pub fn predicate_objects<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> impl Iterator<Item = (&'a RdfPredicate, &'a RdfObject)> + 'a {
        self.triples_with_subject(subject)
            .map(|t| (&t.predicate, &t.object))
    }

    /// Objects of a subject for one predicate
    pub fn objects<'a>(
        &'a self,
        subject: &RdfSubject,
        predicate: &'a RdfPredicate,
    ) -> impl Iterator<Item = &'a RdfObject> + 'a {
        self.triples_with_subject(subject)
            .filter(move |t| &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Subjects having `predicate object`, in store order
    pub fn subjects_with<'a>(
        &'a self,
        predicate: &RdfPredicate,
        object: &'a RdfObject,
    ) -> impl Iterator<Item = &'a RdfSubject> + 'a {
        self.triples_with_predicate(predicate)
            .filter(move |t| &t.object == object)
            .map(|t| &t.subject)
    }

    /// Named resources typed with `rdf:type class`
    pub fn instances_of<'a>(
        &'a self,
        rdf_type: &RdfPredicate,
        class: &'a RdfObject,
    ) -> impl Iterator<Item = &'a NamedNode> + 'a {
        self.subjects_with(rdf_type, class).filter_map(|s| match s {
            RdfSubject::NamedNode(n) => Some(n),
            RdfSubject::BlankNode(_) => None,
        })
    }

    // Private helper methods

    fn positions<'a>(
        &'a self,
        positions: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        positions
            .into_iter()
            .flatten()
            .filter_map(move |&i| self.triples.get_index(i))
    }
}

impl FromIterator<Triple> for RdfStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self::from_triples(iter)
    }
}
