//! HTTP client for the GolfPlex work-queue API.

use std::time::Duration;

use serde_json::json;

use golfplex_core::work::{FetchWorkResponse, SubmitWorkRequest, SubmitWorkResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API rejected the request ({status}): {message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
}

/// Client bound to one GolfPlex API instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    worker_id: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, worker_id: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            worker_id: worker_id.to_string(),
            http,
        })
    }

    /// Claim the next work unit.
    pub async fn fetch_work(&self) -> Result<FetchWorkResponse, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/fetch-work/", self.base_url))
            .timeout(Duration::from_secs(30))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Submit a finished guide for one (destination, language) pair.
    pub async fn submit_work(
        &self,
        destination_id: i64,
        language_code: &str,
        content: &str,
    ) -> Result<SubmitWorkResponse, ApiError> {
        let request = SubmitWorkRequest {
            destination_id: Some(destination_id),
            language_code: Some(language_code.to_string()),
            content: Some(content.to_string()),
            guides: None,
            worker_info: Some(json!({
                "worker_id": self.worker_id,
                "worker_version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
            })),
        };

        let response = self
            .http
            .post(format!("{}/api/submit-work/", self.base_url))
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetch the aggregate work status, untyped for logging purposes.
    pub async fn work_status(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/work-status/", self.base_url))
            .timeout(Duration::from_secs(30))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Decode a JSON body, surfacing the API's error envelope on failure.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => body["message"]
                    .as_str()
                    .unwrap_or("unknown error")
                    .to_string(),
                Err(_) => "unknown error".to_string(),
            };
            return Err(ApiError::Rejected { status, message });
        }
        Ok(response.json().await?)
    }
}
