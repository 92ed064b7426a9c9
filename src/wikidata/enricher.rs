//! Wikidata-backed entity enrichment

use super::client::{SparqlClient, SparqlResults};
use super::{ExternalEnricher, WikidataResult};
use crate::config::WikidataConfig;
use crate::view::{PropertyMap, ViewNode};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Bounds of the per-entity row limit
pub const MIN_RESULT_LIMIT: usize = 30;
pub const MAX_RESULT_LIMIT: usize = 50;

/// Fetches direct claims of a Wikidata entity with English labels
pub struct WikidataEnricher {
    client: SparqlClient,
    limit: usize,
}

impl WikidataEnricher {
    pub fn new(config: &WikidataConfig) -> WikidataResult<Self> {
        Ok(Self {
            client: SparqlClient::new(config)?,
            limit: config.result_limit.clamp(MIN_RESULT_LIMIT, MAX_RESULT_LIMIT),
        })
    }

    /// SELECT query for the direct claims of `external_id`
    pub fn claims_query(external_id: &str, limit: usize) -> String {
        format!(
            r#"PREFIX wd: <http://www.wikidata.org/entity/>
PREFIX wikibase: <http://wikiba.se/ontology#>
PREFIX bd: <http://www.bigdata.com/rdf#>
SELECT ?property ?propertyLabel ?value ?valueLabel WHERE {{
  wd:{external_id} ?prop ?value .
  ?property wikibase:directClaim ?prop .
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "[AUTO_LANGUAGE],en". }}
}} LIMIT {limit}"#
        )
    }

    async fn fetch(&self, external_id: &str) -> WikidataResult<PropertyMap> {
        let results = self
            .client
            .select(&Self::claims_query(external_id, self.limit))
            .await?;
        Ok(claims_to_properties(results))
    }
}

/// Property label -> value label rows; `valueLabel` is preferred, the raw
/// `value` is used when the label service returned none. Rows without a
/// property label are skipped.
pub fn claims_to_properties(results: SparqlResults) -> PropertyMap {
    let mut properties = PropertyMap::new();
    for binding in results.results.bindings {
        let Some(property) = binding.get("propertyLabel") else {
            continue;
        };
        let value = binding
            .get("valueLabel")
            .or_else(|| binding.get("value"));
        if let Some(value) = value {
            properties
                .entry(property.value.clone())
                .or_default()
                .push(ViewNode::literal(value.value.clone()));
        }
    }
    properties
}

/// Wikidata ids are a letter followed by digits (Q42, P31, L7)
fn is_entity_id(id: &str) -> bool {
    let mut chars = id.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && id.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}

#[async_trait]
impl ExternalEnricher for WikidataEnricher {
    async fn fetch_external_properties(&self, external_id: &str) -> PropertyMap {
        if !is_entity_id(external_id) {
            warn!("Refusing to query Wikidata for malformed id {:?}", external_id);
            return PropertyMap::new();
        }
        match self.fetch(external_id).await {
            Ok(properties) => {
                debug!("Wikidata returned {} properties for {}", properties.len(), external_id);
                properties
            }
            Err(e) => {
                warn!("Error querying Wikidata for {}: {}", external_id, e);
                PropertyMap::new()
            }
        }
    }
}
