//! HTTP client for the backend service.
//!
//! The frontend deployment owns no database; it forwards form posts and list
//! queries here. Bodies are passed through untouched and nothing is retried.

use reqwest::StatusCode;
use tracing::debug;

use crate::CoreError;

/// Raw reply of the backend's `/submit`.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// A trailing `/` on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base_url }
    }

    /// POST the form pairs verbatim to `{base}/submit`.
    pub async fn submit(&self, fields: &[(String, String)]) -> Result<BackendReply, CoreError> {
        let url = format!("{}/submit", self.base_url);
        debug!(%url, fields = fields.len(), "forwarding submission");
        let resp = self
            .http
            .post(&url)
            .form(fields)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        Ok(BackendReply { status, body })
    }

    /// GET `{base}/view` and decode it as arbitrary JSON.
    pub async fn fetch_data(&self) -> Result<serde_json::Value, CoreError> {
        let url = format!("{}/view", self.base_url);
        debug!(%url, "fetching submissions");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let json = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        Ok(json)
    }
}
