use crate::error::{BoostError, Result};
use crate::types::SearchResponse;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
const MAX_REDIRECTS: usize = 5;

/// HTTP client for the two Mastodon API calls this crate makes.
///
/// Built once with a fixed request timeout and redirect cap; both calls
/// authenticate with the access key as a bearer token.
pub struct MastodonClient {
    http_client: reqwest::Client,
    base_url: Option<String>,
}

impl MastodonClient {
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            base_url: None,
        }
    }

    /// Route API calls to an explicit base URL instead of `https://{domain}`.
    /// Lets tests point the client at a local stub server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut client = Self::new();
        client.base_url = Some(base_url.into());
        client
    }

    fn api_url(&self, domain: &str, path_and_query: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base.trim_end_matches('/'), path_and_query),
            None => format!("https://{}{}", domain, path_and_query),
        }
    }

    /// Search the instance for statuses matching `query`.
    ///
    /// `Err(Transport)` only for connection-level failures. An HTTP error
    /// status or a body that is not a search response surfaces as a
    /// [`BoostError::Json`]; the caller treats that the same as an empty
    /// result, since the instance may simply not have indexed the object yet.
    pub async fn search_statuses(
        &self,
        domain: &str,
        access_key: &str,
        query: &str,
    ) -> Result<SearchResponse> {
        let url = self.api_url(
            domain,
            &format!(
                "/api/v2/search?resolve=true&type=statuses&limit=1&q={}",
                urlencoding::encode(query)
            ),
        );

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_key))
            .header("Content-Type", "application/json; charset=utf-8")
            .send()
            .await
            .map_err(|e| BoostError::Transport(format!("search on {} failed: {}", domain, e)))?;

        let body = response.text().await.map_err(|e| {
            BoostError::Transport(format!("reading search response from {} failed: {}", domain, e))
        })?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Reblog the status with the given id. The response body is ignored on
    /// success.
    pub async fn reblog(&self, domain: &str, access_key: &str, status_id: &str) -> Result<()> {
        let url = self.api_url(domain, &format!("/api/v1/statuses/{}/reblog", status_id));

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_key))
            .header("Content-Type", "application/json; charset=utf-8")
            .send()
            .await
            .map_err(|e| BoostError::Transport(format!("reblog on {} failed: {}", domain, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoostError::ReblogRejected(status.as_u16()));
        }

        Ok(())
    }
}

impl Default for MastodonClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_builds_https_from_domain() {
        let client = MastodonClient::new();
        assert_eq!(
            client.api_url("mastodon.social", "/api/v1/statuses/42/reblog"),
            "https://mastodon.social/api/v1/statuses/42/reblog"
        );
    }

    #[test]
    fn test_api_url_prefers_explicit_base() {
        let client = MastodonClient::with_base_url("http://127.0.0.1:7700/");
        assert_eq!(
            client.api_url("mastodon.social", "/api/v2/search?q=x"),
            "http://127.0.0.1:7700/api/v2/search?q=x"
        );
    }

    #[test]
    fn test_search_query_is_url_encoded() {
        let client = MastodonClient::new();
        let url = client.api_url(
            "mastodon.social",
            &format!(
                "/api/v2/search?resolve=true&type=statuses&limit=1&q={}",
                urlencoding::encode("https://example.com/post/1")
            ),
        );
        assert_eq!(
            url,
            "https://mastodon.social/api/v2/search?resolve=true&type=statuses&limit=1&q=https%3A%2F%2Fexample.com%2Fpost%2F1"
        );
    }
}
