//! HTTP client for the diary backend

use crate::error::{Error, Result};
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, DashboardSummary, EntryRecord, SaveRequest,
};
use tracing::debug;

/// Default backend address when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client for the diary backend's JSON endpoints.
///
/// One method per endpoint; no retries, no request timeouts beyond reqwest
/// defaults. Callers decide how each failure degrades.
#[derive(Debug, Clone)]
pub struct DiaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl DiaryClient {
    /// Create a client for the given base URL (scheme + host + port).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the assistant a free-text question about the diary.
    ///
    /// Returns the answer, or `None` when the backend responded without one.
    pub async fn analyze(&self, query: &str) -> Result<Option<String>> {
        let url = self.url("/analyze_diary");
        debug!(%url, "analyze request");

        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest {
                query: query.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(status, body));
        }

        let body: AnalyzeResponse = response.json().await?;
        Ok(body.answer.filter(|a| !a.is_empty()))
    }

    /// Persist a diary entry. Success is any 2xx status; the body is
    /// informational only.
    pub async fn save_entry(&self, entry: &str) -> Result<()> {
        let url = self.url("/save_diary");
        debug!(%url, len = entry.len(), "save request");

        let response = self
            .client
            .post(&url)
            .json(&SaveRequest {
                entry: entry.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(status, body));
        }

        Ok(())
    }

    /// Fetch all diary entries, oldest first.
    pub async fn list_entries(&self) -> Result<Vec<EntryRecord>> {
        let url = self.url("/diary/all");
        debug!(%url, "list request");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(status, body));
        }

        Ok(response.json().await?)
    }

    /// Fetch the entry for a specific date (`YYYY-MM-DD`), if any.
    pub async fn entry_by_date(&self, date: &str) -> Result<Option<String>> {
        let url = self.url(&format!("/diary/{}", date));
        debug!(%url, "entry-by-date request");

        let response = self.client.get(&url).send().await?;

        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(status, body));
        }

        Ok(response.json().await?)
    }

    /// Fetch the precomputed dashboard summary.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let url = self.url("/api/dashboard/summary");
        debug!(%url, "summary request");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(status, body));
        }

        Ok(response.json().await?)
    }
}
