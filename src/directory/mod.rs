//! Directory search capability contract.
//!
//! Concrete lookup backends (local store, federation, LDAP and the like)
//! implement [`DirectoryProvider`]; handlers talk to it through
//! [`SearchQuery`], which holds the per-request term and optional credential.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::DomainError;

/// A single matched identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Fully qualified user identifier.
    pub user_id: String,
    /// Display name, when the backend knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL, when the backend knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// An ordered collection of matched identities. Immutable once returned by a
/// backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Whether the backend truncated the result set.
    pub limited: bool,
    /// Matches, in backend order.
    pub results: Vec<Identity>,
}

impl SearchResult {
    /// Concatenates two result sets, preserving the order within each and
    /// flagging truncation if either side was truncated.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.limited |= other.limited;
        self.results.extend(other.results);
        self
    }
}

/// An immutable per-request search: an opaque term plus an optional bearer
/// credential. Constructed per request and discarded after the call.
///
/// The dispatch helpers pick the credentialed provider operation exactly
/// when a token is present, so call sites never branch on it by hand.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    term: String,
    access_token: Option<String>,
}

impl SearchQuery {
    /// Creates a query over `term`, credentialed when `access_token` is
    /// present.
    pub fn new(term: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            term: term.into(),
            access_token,
        }
    }

    /// The opaque search term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Searches display names.
    ///
    /// # Errors
    ///
    /// Whatever [`DomainError`] the backend signals.
    pub async fn search_names(
        &self,
        provider: &dyn DirectoryProvider,
    ) -> Result<SearchResult, DomainError> {
        match &self.access_token {
            Some(token) => provider.search_by_name_with_token(&self.term, token).await,
            None => provider.search_by_name(&self.term).await,
        }
    }

    /// Searches third-party addresses.
    ///
    /// # Errors
    ///
    /// Whatever [`DomainError`] the backend signals.
    pub async fn search_addresses(
        &self,
        provider: &dyn DirectoryProvider,
    ) -> Result<SearchResult, DomainError> {
        match &self.access_token {
            Some(token) => {
                provider
                    .search_by_address_with_token(&self.term, token)
                    .await
            }
            None => provider.search_by_address(&self.term).await,
        }
    }
}

/// A directory lookup backend.
///
/// `query` may be empty; what an empty query matches is implementation
/// defined and must be documented by the implementor. Implementations own
/// their timeouts and backoff and must not block the caller indefinitely.
/// Failures are signaled as [`DomainError`]; transport or parsing errors
/// never cross this boundary raw.
///
/// The credentialed operations are not assumed to be a superset of the plain
/// ones: a backend may route them through a different authorization path or
/// scope the results differently, so callers must not treat the pairs as
/// interchangeable.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Searches identities by display name.
    async fn search_by_name(&self, query: &str) -> Result<SearchResult, DomainError>;

    /// Searches identities by third-party address (email or phone number,
    /// opaque to this layer).
    async fn search_by_address(&self, query: &str) -> Result<SearchResult, DomainError>;

    /// Display-name search on behalf of the bearer of `access_token`.
    async fn search_by_name_with_token(
        &self,
        query: &str,
        access_token: &str,
    ) -> Result<SearchResult, DomainError>;

    /// Third-party-address search on behalf of the bearer of `access_token`.
    async fn search_by_address_with_token(
        &self,
        query: &str,
        access_token: &str,
    ) -> Result<SearchResult, DomainError>;
}

/// Backend used until a real directory is wired in: every search, the empty
/// query included, returns an empty, non-truncated result.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDirectoryProvider;

#[async_trait]
impl DirectoryProvider for EmptyDirectoryProvider {
    async fn search_by_name(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Ok(SearchResult::default())
    }

    async fn search_by_address(&self, _query: &str) -> Result<SearchResult, DomainError> {
        Ok(SearchResult::default())
    }

    async fn search_by_name_with_token(
        &self,
        _query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        Ok(SearchResult::default())
    }

    async fn search_by_address_with_token(
        &self,
        _query: &str,
        _access_token: &str,
    ) -> Result<SearchResult, DomainError> {
        Ok(SearchResult::default())
    }
}
