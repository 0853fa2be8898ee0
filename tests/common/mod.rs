// Not every util is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, response::Response, Extension, Router};
use http::Request;
use http_body_util::BodyExt;
use tower::ServiceExt;

use identity_directory::{
    directory::{DirectoryProvider, Identity, SearchResult},
    routes,
    types::DomainError,
};

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Test router wired to the given directory backend
pub fn test_router(provider: Arc<dyn DirectoryProvider>) -> Router {
    setup_test_env();
    routes::handler().layer(Extension(provider))
}

/// Send a POST request with a JSON body through the router
pub async fn send_post(router: Router, uri: &str, payload: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("Failed to build request");

    router.oneshot(request).await.expect("Failed to send request")
}

/// Send a POST request with a raw body through the router
pub async fn send_post_raw(router: Router, uri: &str, body: Body) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(body)
        .expect("Failed to build request");

    router.oneshot(request).await.expect("Failed to send request")
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Shorthand for an identity with only a user id
pub fn identity(user_id: &str) -> Identity {
    Identity {
        user_id: user_id.to_owned(),
        display_name: None,
        avatar_url: None,
    }
}

/// Canned-result backend: name and address searches return fixed result
/// sets regardless of the query; the credentialed variants answer the same
/// as the plain ones.
pub struct FixtureProvider {
    pub name_matches: SearchResult,
    pub address_matches: SearchResult,
}

#[async_trait]
impl DirectoryProvider for FixtureProvider {
    async fn search_by_name(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Ok(self.name_matches.clone())
    }

    async fn search_by_address(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Ok(self.address_matches.clone())
    }

    async fn search_by_name_with_token(
        &self,
        query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        self.search_by_name(query).await
    }

    async fn search_by_address_with_token(
        &self,
        query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        self.search_by_address(query).await
    }
}

/// Backend that refuses the credential-less operations, for exercising the
/// token dispatch path end to end.
pub struct TokenOnlyProvider {
    pub matches: SearchResult,
}

#[async_trait]
impl DirectoryProvider for TokenOnlyProvider {
    async fn search_by_name(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Err(DomainError::forbidden("Credential required"))
    }

    async fn search_by_address(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Err(DomainError::forbidden("Credential required"))
    }

    async fn search_by_name_with_token(
        &self,
        _query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        Ok(self.matches.clone())
    }

    async fn search_by_address_with_token(
        &self,
        _query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        Ok(SearchResult::default())
    }
}

/// Backend that fails every search with a fixed error
pub struct FailingProvider(pub DomainError);

#[async_trait]
impl DirectoryProvider for FailingProvider {
    async fn search_by_name(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Err(self.0.clone())
    }

    async fn search_by_address(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Err(self.0.clone())
    }

    async fn search_by_name_with_token(
        &self,
        _query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        Err(self.0.clone())
    }

    async fn search_by_address_with_token(
        &self,
        _query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        Err(self.0.clone())
    }
}
