//! Minimal SPARQL-over-HTTP client for the Wikidata query service

use super::{WikidataError, WikidataResult};
use crate::config::WikidataConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// `application/sparql-results+json` document, SELECT form
#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    pub results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
pub struct SparqlBindings {
    pub bindings: Vec<HashMap<String, SparqlValue>>,
}

/// One bound value; only the lexical form is used
#[derive(Debug, Deserialize)]
pub struct SparqlValue {
    pub value: String,
}

pub struct SparqlClient {
    client: Client,
    endpoint: Url,
}

impl SparqlClient {
    pub fn new(config: &WikidataConfig) -> WikidataResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(SPARQL_RESULTS_JSON));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| WikidataError::Config(format!("invalid user agent: {}", e)))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| WikidataError::Config(e.to_string()))?;

        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| WikidataError::Config(format!("invalid endpoint {}: {}", config.endpoint, e)))?;

        Ok(Self { client, endpoint })
    }

    /// Run a SELECT query with a single GET request
    pub async fn select(&self, query: &str) -> WikidataResult<SparqlResults> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("query", query);
        debug!("SPARQL GET {}", self.endpoint);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WikidataError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(WikidataError::Status(resp.status().as_u16()));
        }

        resp.json::<SparqlResults>()
            .await
            .map_err(|e| WikidataError::Decode(e.to_string()))
    }
}

/// Escape text for use inside a double-quoted SPARQL string literal
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results() {
        let body = r#"{
            "head": {"vars": ["item"]},
            "results": {"bindings": [
                {"item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q42"}}
            ]}
        }"#;
        let results: SparqlResults = serde_json::from_str(body).unwrap();
        assert_eq!(results.results.bindings.len(), 1);
        assert_eq!(
            results.results.bindings[0]["item"].value,
            "http://www.wikidata.org/entity/Q42"
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(serde_json::from_str::<SparqlResults>("<html>").is_err());
        // ASK results carry no bindings
        assert!(serde_json::from_str::<SparqlResults>(r#"{"head": {}, "boolean": true}"#).is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = WikidataConfig {
            endpoint: "not a url".to_string(),
            ..WikidataConfig::default()
        };
        assert!(matches!(SparqlClient::new(&config), Err(WikidataError::Config(_))));
    }

    /// Serve `body` as the SPARQL endpoint on a free local port
    async fn endpoint(body: &'static str) -> String {
        let app = axum::Router::new().route(
            "/sparql",
            axum::routing::get(move || async move {
                ([(axum::http::header::CONTENT_TYPE, SPARQL_RESULTS_JSON)], body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}/sparql", addr)
    }

    fn client(endpoint: String) -> SparqlClient {
        SparqlClient::new(&WikidataConfig {
            endpoint,
            timeout_secs: Some(5),
            ..WikidataConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_select_decodes_response() {
        let client = client(
            endpoint(
                r#"{"head": {"vars": ["item"]}, "results": {"bindings": [
                    {"item": {"type": "uri", "value": "http://www.wikidata.org/entity/Q42"}}
                ]}}"#,
            )
            .await,
        );

        let results = client.select("SELECT ?item WHERE { ?item ?p ?o }").await.unwrap();
        assert_eq!(results.results.bindings.len(), 1);
        assert_eq!(
            results.results.bindings[0]["item"].value,
            "http://www.wikidata.org/entity/Q42"
        );
    }

    #[tokio::test]
    async fn test_select_malformed_response() {
        let client = client(endpoint("<html>rate limited</html>").await);
        assert!(matches!(
            client.select("SELECT ?item WHERE { ?item ?p ?o }").await,
            Err(WikidataError::Decode(_))
        ));
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(r#"Dwight "Ike" Eisenhower"#), r#"Dwight \"Ike\" Eisenhower"#);
        assert_eq!(escape_literal("a\\b\nc"), "a\\\\b\\nc");
    }
}
