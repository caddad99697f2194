// Reporting and output for urlscope
// Realizes a RenderView as an HTML fragment, terminal text, or JSON.
// View values arrive sanitized; nothing here escapes them a second time.

use crate::view::{RenderView, ResultView, ViewBody};
use std::fmt::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

pub fn render_as(view: &RenderView, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Html => Ok(render_html(view)),
        OutputFormat::Text => Ok(render_text(view)),
        OutputFormat::Json => render_json(view),
    }
}

/// HTML fragment: the scan button followed by the result panel.
pub fn render_html(view: &RenderView) -> String {
    let mut out = String::new();

    let disabled = if view.trigger.enabled { "" } else { " disabled" };
    let _ = writeln!(
        out,
        "<button id=\"scanBtn\"{}>{}</button>",
        disabled, view.trigger.label
    );

    let mut classes = String::from("result");
    if matches!(view.body, ViewBody::Hidden) {
        classes.push_str(" hidden");
    }
    if let Some(class) = view.visual_class {
        classes.push(' ');
        classes.push_str(class.as_str());
    }
    let _ = writeln!(out, "<div id=\"result\" class=\"{}\">", classes);

    match &view.body {
        ViewBody::Hidden => {}
        ViewBody::Scanning { url } => {
            let _ = writeln!(out, "  <p>Scanning <strong>{}</strong>…</p>", url);
        }
        ViewBody::Error { message } => {
            let _ = writeln!(out, "  <p>{}</p>", message);
        }
        ViewBody::Result(result) => write_result_html(&mut out, result),
    }

    out.push_str("</div>\n");
    out
}

fn write_result_html(out: &mut String, result: &ResultView) {
    let _ = writeln!(
        out,
        "  <div style=\"display:flex;justify-content:space-between;align-items:center;\">"
    );
    let _ = writeln!(out, "    <h3 style=\"margin:0;\">Scan Result</h3>");
    let _ = writeln!(out, "    <span class=\"badge\">{}</span>", result.badge);
    let _ = writeln!(out, "  </div>");
    let _ = writeln!(out, "  <p class=\"explanation\">{}</p>", result.explanation);

    for warning in &result.warnings {
        let _ = writeln!(out, "  <p class=\"warning-note\">{}</p>", warning);
    }

    let _ = writeln!(out, "  <div class=\"kv\">");
    for (label, value) in &result.rows {
        let _ = writeln!(out, "    <div>{}</div><div>{}</div>", label, value);
    }
    let _ = writeln!(out, "  </div>");

    let _ = writeln!(out, "  <div class=\"reasons\">");
    let _ = writeln!(out, "    <h4>Why this verdict:</h4>");
    let _ = writeln!(out, "    <ul>");
    for reason in &result.reasons {
        let _ = writeln!(out, "      <li>{}</li>", reason);
    }
    let _ = writeln!(out, "    </ul>");
    let _ = writeln!(out, "  </div>");
}

/// Plain terminal rendering
pub fn render_text(view: &RenderView) -> String {
    let mut out = String::new();

    match &view.body {
        ViewBody::Hidden => {}
        ViewBody::Scanning { url } => {
            let _ = writeln!(out, "Scanning {}…", url);
        }
        ViewBody::Error { message } => {
            let _ = writeln!(out, "[ERROR] {}", message);
        }
        ViewBody::Result(result) => {
            let class = view
                .visual_class
                .map(|c| c.as_str().to_uppercase())
                .unwrap_or_default();
            let _ = writeln!(out, "[{}] {}", class, result.badge);
            let _ = writeln!(out, "{}", result.explanation);
            for warning in &result.warnings {
                let _ = writeln!(out, "Warning: {}", warning);
            }
            out.push('\n');

            let width = result
                .rows
                .iter()
                .map(|(label, _)| label.chars().count())
                .max()
                .unwrap_or(0);
            for (label, value) in &result.rows {
                let _ = writeln!(out, "  {:<width$}  {}", label, value, width = width);
            }

            let _ = writeln!(out, "\nWhy this verdict:");
            for reason in &result.reasons {
                let _ = writeln!(out, "  - {}", reason);
            }
        }
    }

    out
}

pub fn render_json(view: &RenderView) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}
