//! Scan errors
//!
//! Every failure a scan can hit, from empty input to a body the service
//! should never have sent.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// Blank input. Callers treat this as a no-op, never as a visible error.
    #[error("No URL to scan")]
    EmptyInput,

    #[error("Scan request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status. All codes are reported the same way.
    #[error("Scan failed")]
    Status(u16),

    #[error("Scan timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Malformed scan response: {0}")]
    MalformedResponse(String),

    #[error("Could not parse URL query: {0}")]
    QueryParse(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    /// Message suitable for a single-line error view.
    pub fn user_message(&self) -> String {
        self.to_string()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ScanError::Status(status.as_u16())
        } else if e.is_decode() {
            ScanError::MalformedResponse(e.to_string())
        } else {
            ScanError::Transport(e.to_string())
        }
    }
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reads_like_the_panel_message() {
        assert_eq!(ScanError::Status(503).user_message(), "Scan failed");
    }

    #[test]
    fn user_message_is_single_line() {
        let e = ScanError::Transport("connection reset\nby peer\r\n  retry later".to_string());
        assert_eq!(
            e.user_message(),
            "Scan request failed: connection reset by peer retry later"
        );
    }

    #[test]
    fn timeout_message_names_the_limit() {
        let e = ScanError::Timeout(Duration::from_millis(1500));
        assert_eq!(e.user_message(), "Scan timed out after 1.5s");
    }
}
