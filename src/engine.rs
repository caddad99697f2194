// Async HTTP engine for urlscope
// Talks to the remote scanning service with reqwest

use crate::config::ScannerConfig;
use crate::error::{ScanError, ScanResult};
use crate::models::{ScanRequest, ScanResponse, ScanService};
use reqwest::Client;
use std::time::Duration;

pub struct ScanEngine {
    pub client: Client,
    endpoint: String,
    timeout: Duration,
}

impl ScanEngine {
    pub fn new(config: &ScannerConfig) -> ScanResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ScanError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: config.scan_endpoint(),
            timeout: config.timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ScanService for ScanEngine {
    async fn scan(&self, request: &ScanRequest) -> ScanResult<ScanResponse> {
        tracing::debug!(endpoint = %self.endpoint, url = %request.url, "sending scan request");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %request.url, "scan service rejected request");
            return Err(ScanError::Status(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(|e| self.classify_error(e))?;
        serde_json::from_slice::<ScanResponse>(&body)
            .map_err(|e| ScanError::MalformedResponse(e.to_string()))
    }
}

impl ScanEngine {
    fn classify_error(&self, e: reqwest::Error) -> ScanError {
        if e.is_timeout() {
            ScanError::Timeout(self.timeout)
        } else {
            ScanError::from(e)
        }
    }
}
