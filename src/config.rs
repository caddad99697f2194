use crate::error::{ScanError, ScanResult};
use crate::params::{QueryInspector, DEFAULT_SUSPICIOUS_KEYWORDS};
use std::time::Duration;
use url::Url;

const ENV_API_BASE: &str = "URLSCOPE_API_BASE";
const ENV_TIMEOUT_SECS: &str = "URLSCOPE_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5500";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Base address of the scanning service; requests go to `{base}/api/scan`
    pub base_url: Url,
    pub timeout: Duration,
    /// Query keywords that mark a parameter as suspicious
    pub keywords: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            keywords: DEFAULT_SUSPICIOUS_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl ScannerConfig {
    /// Defaults overridden by `URLSCOPE_API_BASE` and `URLSCOPE_TIMEOUT_SECS`
    pub fn from_env() -> ScanResult<Self> {
        let mut config = Self::default();

        if let Ok(base) = std::env::var(ENV_API_BASE) {
            config = config.with_base_url(&base)?;
        }
        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse::<f64>()
                .map_err(|e| ScanError::Config(format!("{}: {}", ENV_TIMEOUT_SECS, e)))?;
            config = config.with_timeout_secs(secs)?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base: &str) -> ScanResult<Self> {
        let url = Url::parse(base.trim())
            .map_err(|e| ScanError::Config(format!("base URL {:?}: {}", base, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScanError::Config(format!(
                "base URL must be http or https, got {}",
                url.scheme()
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: f64) -> ScanResult<Self> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(ScanError::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                secs
            )));
        }
        self.timeout = Duration::from_secs_f64(secs);
        Ok(self)
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// `{base}/api/scan`, tolerating a trailing slash or a path prefix on the base
    pub fn scan_endpoint(&self) -> String {
        format!("{}/api/scan", self.base_url.as_str().trim_end_matches('/'))
    }

    pub fn inspector(&self) -> QueryInspector {
        QueryInspector::new(&self.keywords)
    }
}
