//! Movie service client.

use super::omdb;
use super::transport::Transport;
use crate::domain::{DetailRecord, PageResult, Query, SearchError};

/// Default OMDb endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Paginated keyword search and detail lookup against the movie service.
///
/// Every call issues a fresh request: there is no caching and no retrying.
/// Retry policy, if any, belongs to the caller.
pub struct SearchClient<T> {
    transport: T,
    base_url: String,
    api_key: String,
}

impl<T: Transport> SearchClient<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Points the client at a different endpoint, e.g. a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page (1-based) of results for `query`.
    ///
    /// # Errors
    ///
    /// See [`omdb::interpret_search`] for how responses map to [`SearchError`].
    #[tracing::instrument(level = "debug", skip(self, query), fields(query = %query))]
    pub async fn search_page(&self, query: &Query, page: u32) -> Result<PageResult, SearchError> {
        let params = [
            ("apikey", self.api_key.clone()),
            ("s", query.as_str().to_string()),
            ("page", page.to_string()),
        ];

        let response = self.transport.get(&self.base_url, &params).await?;
        let result = omdb::interpret_search(page, response.status, &response.body);

        match &result {
            Ok(found) => tracing::debug!(
                items = found.items.len(),
                total = found.total_available,
                "search page loaded"
            ),
            Err(e) => tracing::debug!(error = %e, "search page failed"),
        }
        result
    }

    /// Fetches the full record for `id`.
    ///
    /// # Errors
    ///
    /// See [`omdb::interpret_detail`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_detail(&self, id: &str) -> Result<DetailRecord, SearchError> {
        let params = [
            ("apikey", self.api_key.clone()),
            ("i", id.to_string()),
            ("plot", "full".to_string()),
        ];

        let response = self.transport.get(&self.base_url, &params).await?;
        omdb::interpret_detail(id, response.status, &response.body)
    }
}

impl<T> std::fmt::Debug for SearchClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
