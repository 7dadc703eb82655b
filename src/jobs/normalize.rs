// src/jobs/normalize.rs
//! Free-text and salary normalization applied at the adapter boundary.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Strip HTML tags and decode the fixed entity table. Unknown entities pass
/// through unchanged.
pub fn strip_html(html: &str) -> String {
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)<[^>]*>").unwrap());

    re_tags
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

/// Format an optional salary range the way the digest renders it:
/// both bounds → `"$80,000 - $120,000"`, floor only → `"$80,000+"`,
/// ceiling only → `"Up to $120,000"`, neither → `None`.
/// Estimated values get an `" (estimated)"` suffix.
pub fn format_salary(min: Option<f64>, max: Option<f64>, estimated: bool) -> Option<String> {
    let suffix = if estimated { " (estimated)" } else { "" };

    match (min, max) {
        (Some(lo), Some(hi)) => Some(format!(
            "{} - {}{}",
            format_usd(lo),
            format_usd(hi),
            suffix
        )),
        (Some(lo), None) => Some(format!("{}+{}", format_usd(lo), suffix)),
        (None, Some(hi)) => Some(format!("Up to {}{}", format_usd(hi), suffix)),
        (None, None) => None,
    }
}

/// en-US currency formatting, whole dollars, comma grouping.
fn format_usd(amount: f64) -> String {
    let whole = amount.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
