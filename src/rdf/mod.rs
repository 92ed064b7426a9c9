//! RDF (Resource Description Framework) support for ttlview
//!
//! This module implements the read-only graph the viewer serves:
//! - RDF triples (subject-predicate-object) over oxrdf terms
//! - An insertion-ordered in-memory store with subject/predicate indices
//! - Turtle parsing and serialization via rio
//! - Namespace prefixes for compact IRIs
//! - The `owl:sameAs` literal normalization pass
//!
//! # Example
//!
//! ```rust
//! use ttlview::rdf::{RdfStore, Triple, NamedNode, Literal, RdfPredicate};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//!
//! store.insert(Triple::new(subject.clone().into(), predicate, object.into())).unwrap();
//!
//! assert_eq!(store.triples_with_subject(&subject.into()).count(), 1);
//! ```

mod namespace;
mod normalize;
mod serialization;
mod store;
mod types;

pub use types::{
    local_name, BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult,
    RdfSubject, RdfTerm, Triple,
};

pub use store::{RdfStore, RdfStoreError, RdfStoreResult};

pub use namespace::{
    NamespaceManager, FOAF_NAME, FOAF_NS, OWL_NS, OWL_SAME_AS,
    RDFS_LABEL, RDFS_NS, RDF_NS, RDF_TYPE, WIKIDATA_ENTITY_NS,
};

pub use normalize::normalize_same_as;

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult, TurtleParserWrapper, TurtleSerializerWrapper,
};
