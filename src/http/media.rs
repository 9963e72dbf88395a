//! Media request handler mapped to `/` and `/{*path}`

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use media_share_lib::{content_type, EntryType, ListOptions, MediaStat, PathLink};
use serde::Serialize;

use super::handlers::HttpError;
use crate::state::AppState;

/// JSON body of a directory listing.
#[derive(Debug, Serialize)]
pub struct DirListing {
    pub path: String,
    pub links: Vec<PathLink>,
    pub entries: Vec<MediaStat>,
}

/// Serve whatever lives at the request path.
///
/// The raw URI path is used rather than axum's decoded `Path`: the catalog
/// percent-decodes exactly once itself.
pub async fn handle_media_request(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query_params): Query<HashMap<String, String>>,
) -> Result<Response, HttpError> {
    let path = uri.path();

    match state.catalog.entry_type(path).await {
        EntryType::Dir => list_directory(&state, path, &query_params).await,
        EntryType::File if wants_vtt(&query_params) => {
            let video = query_params.get("video").map(String::as_str);
            let vtt = state.transcoder.convert(&state.catalog, path, video).await?;

            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/vtt; charset=utf-8"),
            );
            Ok((headers, vtt).into_response())
        }
        EntryType::File => {
            let parsed = state.catalog.parse_path(path);
            let data = state.catalog.get_file(path).await?;

            let mut headers = HeaderMap::new();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type(&parsed.extension)),
            );
            Ok((headers, Bytes::from(data)).into_response())
        }
        EntryType::Unknown => Err(HttpError::NotFound(format!("Not found: {}", path))),
        EntryType::Error => Err(HttpError::InternalError(format!(
            "Cannot access {}",
            path
        ))),
    }
}

async fn list_directory(
    state: &AppState,
    path: &str,
    query_params: &HashMap<String, String>,
) -> Result<Response, HttpError> {
    let options = ListOptions {
        dir_sizes: query_params
            .get("sizes")
            .map(|v| is_truthy(v))
            .unwrap_or(state.config.listing.dir_sizes),
    };

    let entries = state
        .catalog
        .list_dir(path, &state.base_url, options)
        .await?;
    let listing = DirListing {
        path: state.catalog.secure_url(path, None),
        links: state
            .catalog
            .path_links(path, state.config.base_path.as_deref()),
        entries,
    };

    tracing::debug!("listing {} ({} entries)", listing.path, listing.entries.len());
    Ok(Json(listing).into_response())
}

fn wants_vtt(query_params: &HashMap<String, String>) -> bool {
    query_params
        .get("format")
        .is_some_and(|f| f.eq_ignore_ascii_case("vtt"))
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
