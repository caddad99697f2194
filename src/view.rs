// Render description for urlscope
// A pure function from ScanState to what a front end should show.
// Every string in the view model is already sanitized.

use crate::format::format_number;
use crate::models::{ScanResponse, Verdict};
use crate::orchestrator::ScanState;
use crate::params::{QueryInsight, QueryInspector};
use crate::sanitize::sanitize;
use crate::verdict::{classify, Tier, VisualClass};
use serde::Serialize;

pub const NO_REASONS: &str = "No major risks detected.";
pub const NO_SUBDOMAIN: &str = "(none)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderView {
    pub visual_class: Option<VisualClass>,
    pub trigger: TriggerView,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: &'static str,
}

impl TriggerView {
    fn ready() -> Self {
        Self {
            enabled: true,
            label: "Scan",
        }
    }

    fn busy() -> Self {
        Self {
            enabled: false,
            label: "Scanning…",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewBody {
    Hidden,
    Scanning { url: String },
    Result(ResultView),
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub tier: Tier,
    pub badge: String,
    pub explanation: String,
    /// Key/value table in display order
    pub rows: Vec<(String, String)>,
    /// One line per reason, or the single "no risks" line
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

impl ResultView {
    pub fn row(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

pub fn render(state: &ScanState, inspector: &QueryInspector) -> RenderView {
    match state {
        ScanState::Idle => RenderView {
            visual_class: None,
            trigger: TriggerView::ready(),
            body: ViewBody::Hidden,
        },
        ScanState::Scanning(url) => RenderView {
            visual_class: None,
            trigger: TriggerView::busy(),
            body: ViewBody::Scanning { url: sanitize(url) },
        },
        ScanState::Success(response) => {
            let result = render_result(response, inspector);
            RenderView {
                visual_class: Some(result.tier.visual_class()),
                trigger: TriggerView::ready(),
                body: ViewBody::Result(result),
            }
        }
        ScanState::Failed(message) => RenderView {
            visual_class: Some(VisualClass::Error),
            trigger: TriggerView::ready(),
            body: ViewBody::Error {
                message: format!("Error: {}", sanitize(message)),
            },
        },
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

fn render_result(response: &ScanResponse, inspector: &QueryInspector) -> ResultView {
    let presentation = classify(response.verdict.risk_score);
    let details = &response.details;
    let f = &details.features;

    let mut warnings = Vec::new();
    let query = match inspector.inspect(&details.parsed_url) {
        Ok(insight) => insight,
        Err(e) => {
            tracing::warn!(parsed_url = %details.parsed_url, error = %e, "query inspection skipped");
            warnings.push(sanitize(&e.user_message()));
            QueryInsight::default()
        }
    };

    let rows = vec![
        ("URL", sanitize(&details.parsed_url)),
        ("Domain", sanitize(&details.domain)),
        ("Subdomain", sanitize(details.subdomain().unwrap_or(NO_SUBDOMAIN))),
        ("Uses HTTPS", yes_no(f.uses_https)),
        ("Suspicious TLD", yes_no(f.suspicious_tld)),
        ("IP Host", yes_no(f.is_ip_host)),
        ("URL Shortener", yes_no(f.uses_shortener)),
        ("URL Length", format_number(&f.url_length)),
        ("Host Length", format_number(&f.host_length)),
        ("Dots in Host", f.num_dots.to_string()),
        ("Digits in Host", f.num_digits_host.to_string()),
        ("Query Params", query.count.to_string()),
        ("Suspicious Params", yes_no(query.suspicious)),
    ]
    .into_iter()
    .map(|(label, value)| (label.to_string(), value))
    .collect();

    ResultView {
        tier: presentation.tier,
        badge: sanitize(&presentation.label),
        explanation: sanitize(&presentation.explanation),
        rows,
        reasons: reason_lines(&response.verdict),
        warnings,
    }
}

fn reason_lines(verdict: &Verdict) -> Vec<String> {
    if verdict.reasons.is_empty() {
        return vec![NO_REASONS.to_string()];
    }
    verdict
        .reasons
        .iter()
        .map(|r| format!("+{} — {}", sanitize(&r.points), sanitize(&r.reason)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_hidden_and_ready() {
        let view = render(&ScanState::Idle, &QueryInspector::default());
        assert_eq!(view.body, ViewBody::Hidden);
        assert_eq!(view.visual_class, None);
        assert!(view.trigger.enabled);
        assert_eq!(view.trigger.label, "Scan");
    }

    #[test]
    fn scanning_placeholder_escapes_input() {
        let state = ScanState::Scanning("http://x/<script>".to_string());
        let view = render(&state, &QueryInspector::default());
        assert_eq!(
            view.body,
            ViewBody::Scanning {
                url: "http://x/&lt;script&gt;".to_string()
            }
        );
        assert!(!view.trigger.enabled);
        assert_eq!(view.trigger.label, "Scanning…");
    }

    #[test]
    fn failure_is_error_styled() {
        let state = ScanState::Failed("bad \"gateway\"".to_string());
        let view = render(&state, &QueryInspector::default());
        assert_eq!(view.visual_class, Some(VisualClass::Error));
        assert_eq!(
            view.body,
            ViewBody::Error {
                message: "Error: bad &quot;gateway&quot;".to_string()
            }
        );
        assert!(view.trigger.enabled);
    }
}
