//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT), read only

mod turtle;

pub use turtle::{TurtleParserWrapper, TurtleSerializerWrapper};

use super::{RdfError, RdfStore, Triple};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
}

impl RdfFormat {
    /// Guess the format from a file extension, defaulting to Turtle
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("nt") => RdfFormat::NTriples,
            _ => RdfFormat::Turtle,
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error reported by the parser
    #[error("Syntax error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// Term rejected by the RDF model
    #[error("Invalid term: {0}")]
    Term(#[from] RdfError),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0:?}")]
    UnsupportedFormat(RdfFormat),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> ParseResult<Vec<Triple>> {
        match format {
            RdfFormat::Turtle => TurtleParserWrapper::parse(input.as_bytes()),
            RdfFormat::NTriples => TurtleParserWrapper::parse_ntriples(input.as_bytes()),
        }
    }

    /// Parse RDF data from a file, choosing the format by extension
    pub fn parse_file(path: &Path) -> ParseResult<Vec<Triple>> {
        let reader = BufReader::new(File::open(path)?);
        match RdfFormat::from_path(path) {
            RdfFormat::Turtle => TurtleParserWrapper::parse(reader),
            RdfFormat::NTriples => TurtleParserWrapper::parse_ntriples(reader),
        }
    }

    /// Load a file into a store
    pub fn load_store(path: &Path) -> ParseResult<RdfStore> {
        Ok(RdfStore::from_triples(Self::parse_file(path)?))
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize a store to a string
    pub fn serialize_store(store: &RdfStore, format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => TurtleSerializerWrapper::serialize(store.iter()),
            other => Err(SerializeError::UnsupportedFormat(other)),
        }
    }

    /// Serialize a store to a Turtle file
    pub fn serialize_file(store: &RdfStore, path: &Path) -> SerializeResult<()> {
        let output = Self::serialize_store(store, RdfFormat::Turtle)?;
        std::fs::write(path, output)?;
        Ok(())
    }
}
