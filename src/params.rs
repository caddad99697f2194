// Query parameter inspection for urlscope
// A secondary signal next to the service's verdict: how many query
// parameters the URL carries and whether any look credential-related

use crate::error::ScanResult;
use serde::Serialize;
use url::Url;

pub const DEFAULT_SUSPICIOUS_KEYWORDS: &[&str] =
    &["password", "login", "verify", "token", "session", "account"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QueryInsight {
    pub count: usize,
    pub suspicious: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInspector {
    keywords: Vec<String>,
}

impl Default for QueryInspector {
    fn default() -> Self {
        Self::new(DEFAULT_SUSPICIOUS_KEYWORDS.iter().copied())
    }
}

impl QueryInspector {
    /// Build an inspector with a custom keyword set. Keywords are matched
    /// case-insensitively; empty keywords are dropped since they would
    /// match everything.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Count the query pairs of `parsed_url` and flag any whose key or
    /// value contains a keyword.
    pub fn inspect(&self, parsed_url: &str) -> ScanResult<QueryInsight> {
        let url = Url::parse(parsed_url)?;

        let mut count = 0;
        let mut suspicious = false;
        for (key, value) in url.query_pairs() {
            count += 1;
            if !suspicious {
                suspicious = self.is_suspicious(&key) || self.is_suspicious(&value);
            }
        }

        Ok(QueryInsight { count, suspicious })
    }

    fn is_suspicious(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }
}
