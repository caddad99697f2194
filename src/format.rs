// Number formatting for display

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;

lazy_static! {
    // sign, integer digits, everything after (fraction, exponent)
    static ref NUMBER_PARTS: Regex = Regex::new(r"^([+-]?)(\d+)(.*)$").unwrap();
}

/// Group the integer digits of `n` in threes with `,`.
///
/// The sign and any fractional part are left alone. Text that does not
/// start with digits is returned unchanged.
pub fn format_number<T: Display + ?Sized>(n: &T) -> String {
    let text = n.to_string();
    let Some(caps) = NUMBER_PARTS.captures(&text) else {
        return text;
    };

    let digits = &caps[2];
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}{}", &caps[1], grouped, &caps[3])
}
