//! HTTP handlers for the viewer pages and JSON API

use super::render;
use super::server::AppState;
use crate::view::{search, EntityViewBuilder, ViewError};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use rust_embed::RustEmbed;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

/// `?q=` parameter of the index and search endpoints
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Start page: label search, or the default listing without a query
pub async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let hits = search(state.context(), &params.q);
    debug!("Search {:?} -> {} hits", params.q, hits.len());
    Html(render::index_page(&params.q, &hits))
}

/// Entity detail page
pub async fn entity_handler(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Response {
    let builder = EntityViewBuilder::new(state.context());
    match builder.build(&entity_id, state.enricher.as_ref()).await {
        Ok(view) => Html(render::entity_page(&view)).into_response(),
        Err(ViewError::NotFound(id)) => {
            info!("Entity not found: {}", id);
            (StatusCode::NOT_FOUND, Html(render::not_found_page(&id))).into_response()
        }
    }
}

/// JSON search
pub async fn api_search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    Json(search(state.context(), &params.q))
}

/// JSON entity view
pub async fn api_entity_handler(
    State(state): State<AppState>,
    Path(entity_id): Path<String>,
) -> Response {
    let builder = EntityViewBuilder::new(state.context());
    match builder.build(&entity_id, state.enricher.as_ref()).await {
        Ok(view) => Json(view).into_response(),
        Err(e @ ViewError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

/// Handler for system status
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "storage": {
            "triples": state.store.len(),
        }
    }))
}

/// Embedded static assets
pub async fn static_handler(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(asset) => {
            let content_type = match path.rsplit_once('.').map(|(_, ext)| ext) {
                Some("css") => mime::TEXT_CSS_UTF_8,
                Some("html") => mime::TEXT_HTML_UTF_8,
                Some("js") => mime::APPLICATION_JAVASCRIPT_UTF_8,
                _ => mime::APPLICATION_OCTET_STREAM,
            };
            (
                [(header::CONTENT_TYPE, content_type.as_ref().to_string())],
                asset.data.into_owned(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
