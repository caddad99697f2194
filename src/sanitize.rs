// Markup escaping for urlscope
// Everything the service or the user supplies passes through here before rendering

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt::Display;

lazy_static! {
    static ref MARKUP_CHARS: Regex = Regex::new(r#"[<>&'"]"#).unwrap();
}

/// Escape `< > & ' "` to their entities. Any displayable value is accepted
/// and converted to text first.
pub fn sanitize<T: Display + ?Sized>(text: &T) -> String {
    let text = text.to_string();
    MARKUP_CHARS
        .replace_all(&text, |caps: &Captures| match &caps[0] {
            "<" => "&lt;",
            ">" => "&gt;",
            "&" => "&amp;",
            "'" => "&#39;",
            _ => "&quot;",
        })
        .into_owned()
}
