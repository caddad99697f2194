/// Security tests for urlscope
/// Service and user text must never reach rendered output unescaped
mod common;

use common::{benign_response, risky_response};
use urlscope::models::Reason;
use urlscope::orchestrator::ScanState;
use urlscope::params::QueryInspector;
use urlscope::reporting::{render_html, render_json};
use urlscope::sanitize::sanitize;
use urlscope::view::render;

const ENTITIES: &[&str] = &["&lt;", "&gt;", "&amp;", "&#39;", "&quot;"];

/// True when every `&` in `text` starts one of the five entities
fn ampersands_are_entities(text: &str) -> bool {
    text.match_indices('&')
        .all(|(i, _)| ENTITIES.iter().any(|e| text[i..].starts_with(e)))
}

#[test]
fn test_sanitize_output_has_no_raw_markup() {
    let inputs = [
        "<script>alert(1)</script>",
        "\"onmouseover='x'",
        "a & b && c",
        "&amp;&lt;already&gt;",
        "<<>>''\"\"&&",
        "plain text",
        "",
    ];
    for input in inputs {
        let out = sanitize(input);
        assert!(!out.contains('<'), "{:?}", out);
        assert!(!out.contains('>'), "{:?}", out);
        assert!(!out.contains('\''), "{:?}", out);
        assert!(!out.contains('"'), "{:?}", out);
        assert!(ampersands_are_entities(&out), "{:?}", out);
    }
}

#[test]
fn test_hostile_response_fields_are_escaped_in_html() {
    let mut response = risky_response(90.0);
    response.details.domain = "<img src=x onerror=alert(1)>".to_string();
    response.details.subdomain = Some("\"><script>".to_string());
    response.details.parsed_url = "http://evil.example/?q=<b>'x'</b>".to_string();
    response.verdict.reasons = vec![Reason {
        points: 50.0,
        reason: "<script>steal()</script>".to_string(),
    }];

    let html = render_html(&render(&ScanState::Success(response), &QueryInspector::default()));

    assert!(!html.contains("<img"));
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(html.contains("&quot;&gt;&lt;script&gt;"));
    assert!(html.contains("<li>+50 — &lt;script&gt;steal()&lt;/script&gt;</li>"));
}

#[test]
fn test_scanning_placeholder_escapes_user_input() {
    let state = ScanState::Scanning("javascript:alert('<x>')".to_string());
    let html = render_html(&render(&state, &QueryInspector::default()));
    assert!(html.contains("<strong>javascript:alert(&#39;&lt;x&gt;&#39;)</strong>"));
}

#[test]
fn test_error_message_is_escaped() {
    let state = ScanState::Failed("upstream said <h1>502</h1>".to_string());
    let html = render_html(&render(&state, &QueryInspector::default()));
    assert!(html.contains("<p>Error: upstream said &lt;h1&gt;502&lt;/h1&gt;</p>"));
    assert!(html.contains("class=\"result error\""));
}

#[test]
fn test_json_output_carries_escaped_values() {
    let mut response = benign_response();
    response.details.domain = "a&b".to_string();
    let json = render_json(&render(&ScanState::Success(response), &QueryInspector::default()))
        .expect("view serializes");
    assert!(json.contains("a&amp;b"));
}
