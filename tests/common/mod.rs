#![allow(dead_code)]

use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use urlscope::error::{ScanError, ScanResult};
use urlscope::models::{ScanRequest, ScanResponse, ScanService};

type Responder = Box<dyn Fn(&ScanRequest) -> ScanResult<ScanResponse> + Send + Sync>;

/// In-memory stand-in for the scanning service
pub struct StubService {
    respond: Responder,
    delay: Option<Duration>,
    /// Only URLs containing this marker are delayed
    delay_marker: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StubService {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&ScanRequest) -> ScanResult<ScanResponse> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delay: None,
            delay_marker: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn returning(response: ScanResponse) -> Self {
        Self::new(move |_| Ok(response.clone()))
    }

    pub fn failing_with<F>(make_error: F) -> Self
    where
        F: Fn() -> ScanError + Send + Sync + 'static,
    {
        Self::new(move |_| Err(make_error()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay only requests whose URL contains `marker`
    pub fn with_delay_for(mut self, marker: &str, delay: Duration) -> Self {
        self.delay = Some(delay);
        self.delay_marker = Some(marker.to_string());
        self
    }

    /// Shared counter of requests received, usable after the stub is moved
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ScanService for StubService {
    async fn scan(&self, request: &ScanRequest) -> ScanResult<ScanResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delayed = match &self.delay_marker {
            Some(marker) => request.url.contains(marker.as_str()),
            None => true,
        };
        if let (Some(delay), true) = (self.delay, delayed) {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(request)
    }
}

/// The service's answer for `http://example.com`
pub fn benign_response() -> ScanResponse {
    serde_json::from_value(json!({
        "verdict": {"risk_score": 0, "reasons": []},
        "details": {
            "parsed_url": "http://example.com/",
            "domain": "example.com",
            "subdomain": "",
            "features": {
                "uses_https": false, "suspicious_tld": false, "is_ip_host": false,
                "uses_shortener": false, "url_length": 19, "host_length": 11,
                "num_dots": 1, "num_digits_host": 0
            }
        }
    }))
    .expect("benign fixture decodes")
}

/// A phishing-looking URL with a few reasons attached
pub fn risky_response(score: f64) -> ScanResponse {
    serde_json::from_value(json!({
        "verdict": {
            "risk_score": score,
            "reasons": [
                {"points": 30, "reason": "Suspicious TLD (.tk)"},
                {"points": 20, "reason": "Credential keywords in path"},
                {"points": 18, "reason": "Many subdomain levels"}
            ]
        },
        "details": {
            "parsed_url": "https://secure.login.paypal-verify.tk/signin?session=abc&user=bob",
            "domain": "paypal-verify.tk",
            "subdomain": "secure.login",
            "features": {
                "uses_https": true, "suspicious_tld": true, "is_ip_host": false,
                "uses_shortener": false, "url_length": 63, "host_length": 30,
                "num_dots": 3, "num_digits_host": 0
            }
        }
    }))
    .expect("risky fixture decodes")
}
