//! Definition enrichment
//!
//! Looks up a short encyclopedia definition for each matched term via the
//! Wikipedia REST summary endpoint. One independent request per term per
//! pass; no caching, batching, retries, or rate limiting. A missing page
//! gets a sentinel string; a transport failure propagates and aborts the
//! current pass.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::config::LookupSettings;

/// Returned verbatim when no page exists for a term.
pub const DEFINITION_NOT_FOUND: &str = "Definition not found.";

/// Provides a short definition for a matched term.
pub trait DefinitionSource {
    fn define(&self, term: &str) -> Result<String>;
}

/// Summary payload from the REST endpoint. Only the extract is used.
#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: String,
}

/// Wikipedia REST summary client.
///
/// HTTP goes through reqwest's async client driven by a private runtime,
/// keeping the analysis pass itself synchronous.
pub struct WikipediaClient {
    client: reqwest::Client,
    endpoint: String,
    summary_limit: usize,
    runtime: Runtime,
}

impl WikipediaClient {
    pub fn new(settings: &LookupSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .context("building definition lookup client")?;
        let runtime = Runtime::new().context("creating definition lookup runtime")?;
        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            summary_limit: settings.summary_limit,
            runtime,
        })
    }

    fn summary_url(&self, term: &str) -> Result<reqwest::Url> {
        let mut url =
            reqwest::Url::parse(&self.endpoint).context("invalid definition lookup endpoint")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("definition lookup endpoint cannot be a base URL"))?
            .extend(["page", "summary", term]);
        Ok(url)
    }
}

impl DefinitionSource for WikipediaClient {
    fn define(&self, term: &str) -> Result<String> {
        let url = self.summary_url(term)?;
        debug!(%term, "fetching definition");

        self.runtime.block_on(async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .with_context(|| format!("definition lookup for '{term}' failed"))?;

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(DEFINITION_NOT_FOUND.to_string());
            }

            let response = response
                .error_for_status()
                .with_context(|| format!("definition lookup for '{term}' failed"))?;
            let summary: PageSummary = response
                .json()
                .await
                .context("decoding definition payload")?;
            Ok(truncate_chars(&summary.extract, self.summary_limit))
        })
    }
}

/// First `limit` characters of `text`, respecting char boundaries.
fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("short summary", 300), "short summary");
    }

    #[test]
    fn test_truncate_limits_to_300_chars() {
        let long = "a".repeat(500);
        let truncated = truncate_chars(&long, 300);
        assert_eq!(truncated.chars().count(), 300);
        assert!(long.starts_with(&truncated));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(10);
        let truncated = truncate_chars(&text, 5);
        assert_eq!(truncated, "é".repeat(5));
    }

    #[test]
    fn test_summary_url_encodes_term() {
        let client = WikipediaClient::new(&LookupSettings::default()).unwrap();
        let url = client.summary_url("high fructose corn syrup").unwrap();
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/high%20fructose%20corn%20syrup"
        );
    }

    #[test]
    fn test_not_found_sentinel_is_exact() {
        assert_eq!(DEFINITION_NOT_FOUND, "Definition not found.");
    }
}
