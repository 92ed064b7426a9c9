//! Viewer configuration
//!
//! Defaults target the bundled data set; a YAML file can override any
//! field and command-line flags override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Invalid config file {0}: {1}")]
    Yaml(PathBuf, #[source] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Turtle (or N-Triples) file loaded at startup
    pub data_file: PathBuf,
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Namespace entity identifiers are resolved against first
    pub primary_namespace: String,
    /// Namespace tried when the primary one has no such subject
    pub fallback_namespace: String,
    /// Class listed on the start page when no search query is given
    pub listing_type: String,
    /// IRI fragments marking resources that live in an external authority;
    /// such resources link out instead of to a local entity page
    pub external_authorities: Vec<String>,
    /// Wikidata enrichment settings
    pub wikidata: WikidataConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("turtledata/local_data.ttl"),
            address: "127.0.0.1".to_string(),
            port: 5000,
            primary_namespace: "http://example.org/mybase#".to_string(),
            fallback_namespace: crate::rdf::RDFS_NS.to_string(),
            listing_type: "http://example.org/mybase#CabinetAppointee".to_string(),
            external_authorities: vec!["wikidata.org".to_string()],
            wikidata: WikidataConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Load a configuration file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_yaml(&text).map_err(|e| ConfigError::Yaml(path.to_path_buf(), e))
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Whether an IRI belongs to one of the external authorities
    pub fn is_external(&self, iri: &str) -> bool {
        self.external_authorities.iter().any(|marker| iri.contains(marker.as_str()))
    }
}

/// Settings for the outbound SPARQL endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikidataConfig {
    /// Enable enrichment of entity pages
    pub enabled: bool,
    /// SPARQL endpoint URL
    pub endpoint: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Maximum number of property/value rows fetched per entity
    pub result_limit: usize,
    /// Request timeout; `None` keeps the transport default
    pub timeout_secs: Option<u64>,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://query.wikidata.org/sparql".to_string(),
            user_agent: format!("ttlview/{} (RDF entity viewer)", crate::VERSION),
            result_limit: 30,
            timeout_secs: None,
        }
    }
}
