// Core data models and traits for urlscope

use crate::error::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/scan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    pub url: String,
}

impl ScanRequest {
    /// Build a request from raw user input. The input is trimmed; blank
    /// input is rejected so an empty URL is never sent.
    pub fn new(raw: &str) -> ScanResult<Self> {
        let url = raw.trim();
        if url.is_empty() {
            return Err(ScanError::EmptyInput);
        }
        Ok(Self {
            url: url.to_string(),
        })
    }
}

/// What the scanning service returns. Untrusted until sanitized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub verdict: Verdict,
    pub details: Details,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub risk_score: f64,
    /// Contributing factors, in the order the service ranked them
    pub reasons: Vec<Reason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub points: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub parsed_url: String,
    pub domain: String,
    #[serde(default)]
    pub subdomain: Option<String>,
    pub features: FeatureSet,
}

impl Details {
    /// Subdomain if the service reported a non-empty one
    pub fn subdomain(&self) -> Option<&str> {
        self.subdomain.as_deref().filter(|s| !s.is_empty())
    }
}

/// Lexical signals computed by the service. Displayed, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub uses_https: bool,
    pub suspicious_tld: bool,
    pub is_ip_host: bool,
    pub uses_shortener: bool,
    pub url_length: u64,
    pub host_length: u64,
    pub num_dots: u64,
    pub num_digits_host: u64,
}

/// Trait for anything that can assess a URL (the remote service, or a
/// stand-in in tests)
#[allow(async_fn_in_trait)]
pub trait ScanService {
    async fn scan(&self, request: &ScanRequest) -> ScanResult<ScanResponse>;
}
