//! The user directory search endpoint.

use std::sync::Arc;

use axum::{body::Body, extract::Request, response::Response, Extension};
use http::request::Parts;
use serde::Deserialize;

use crate::{
    directory::{DirectoryProvider, SearchQuery, SearchResult},
    handler,
    types::DomainError,
};

/// Search request payload.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Term to match against display names and third-party addresses.
    pub search_term: String,
}

/// `POST /_matrix/client/r0/user_directory/search`
///
/// Searches the directory by display name and by third-party address and
/// merges the two result sets, names first. When the request carries an
/// `access_token` query parameter, the credentialed provider operations are
/// used instead of the plain ones.
pub async fn search(
    Extension(provider): Extension<Arc<dyn DirectoryProvider>>,
    request: Request,
) -> Response {
    let (parts, body) = request.into_parts();
    match run_search(&parts, body, provider.as_ref()).await {
        Ok(result) => handler::json_response(&result),
        Err(err) => handler::domain_error_response(&parts, &err),
    }
}

async fn run_search(
    parts: &Parts,
    body: Body,
    provider: &dyn DirectoryProvider,
) -> Result<SearchResult, DomainError> {
    tracing::debug!(
        "Directory search from {} on {}",
        handler::remote_address(parts),
        parts.uri.path()
    );

    let token = handler::query_param(parts, "access_token")?;
    let request: SearchRequest = handler::parse_json_body(body).await?;
    let query = SearchQuery::new(request.search_term, (!token.is_empty()).then_some(token));

    let by_name = query.search_names(provider).await?;
    let by_address = query.search_addresses(provider).await?;
    Ok(by_name.merge(by_address))
}
