//! String sanitization for untrusted config content.
//!
//! Everything interpolated into a generated page passes through one of three
//! cleaners, depending on the context it lands in:
//!
//! - [`sanitize_html`] — rich text fragments (section body copy)
//! - [`sanitize_url`] — `href`/`src` attribute values
//! - [`sanitize_css_value`] — inline style values
//!
//! All three are total: non-HTML garbage in means empty string (or `"#"` for
//! URLs) out, never a panic. Rejected URLs additionally emit a warning so the
//! config author can find the offending value.
//!
//! # Known Limitation
//!
//! [`sanitize_html`] is a best-effort **denylist** filter built on regex
//! stripping, not a parser-based allow-list sanitizer. Malformed or
//! adversarially nested markup can slip past individual rules. It is a second
//! line of defense behind config validation, which rejects unsafe URLs
//! outright; do not point it at genuinely hostile input and expect miracles.

use regex::Regex;
use std::sync::LazyLock;

use crate::output;

/// Tags removed entirely, including their content for paired forms.
const DENIED_TAGS: [&str; 11] = [
    "iframe", "object", "embed", "form", "input", "button", "textarea", "select", "meta", "link",
    "base",
];

/// URL schemes allowed through [`sanitize_url`] unchanged.
const SAFE_SCHEMES: [&str; 5] = ["http:", "https:", "mailto:", "tel:", "#"];

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap());
static EVENT_HANDLER_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s*on\w+\s*=\s*["'][^"']*["']"#).unwrap());
static EVENT_HANDLER_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*on\w+\s*=\s*[^\s>]+").unwrap());
static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").unwrap());
static DATA_HTML_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)data\s*:\s*text/html").unwrap());
static STYLE_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s*style\s*=\s*["'][^"']*["']"#).unwrap());
static CSS_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)expression\s*\(").unwrap());
static CSS_URL_JAVASCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)url\s*\(\s*["']?\s*javascript"#).unwrap());

/// Per denied tag: a paired-form pattern (tag plus content) and an open or
/// self-closing form pattern.
static DENIED_TAG_PATTERNS: LazyLock<Vec<(Regex, Regex)>> = LazyLock::new(|| {
    DENIED_TAGS
        .iter()
        .map(|tag| {
            let paired = Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap();
            let single = Regex::new(&format!(r"(?i)<{tag}\b[^>]*/?>")).unwrap();
            (paired, single)
        })
        .collect()
});

/// Strip dangerous constructs from an HTML fragment.
///
/// Removes, in order: `<script>` blocks including content, inline event
/// handler attributes (quoted and bareword), `javascript:` and
/// `data:text/html` schemes, inline `style` attributes, and the fixed tag
/// denylist. Empty input yields `""`.
pub fn sanitize_html(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut html = SCRIPT_BLOCK.replace_all(input, "").into_owned();
    html = EVENT_HANDLER_QUOTED.replace_all(&html, "").into_owned();
    html = EVENT_HANDLER_BARE.replace_all(&html, "").into_owned();
    html = JAVASCRIPT_SCHEME.replace_all(&html, "").into_owned();
    html = DATA_HTML_SCHEME.replace_all(&html, "").into_owned();
    html = STYLE_ATTR.replace_all(&html, "").into_owned();

    for (paired, single) in DENIED_TAG_PATTERNS.iter() {
        html = paired.replace_all(&html, "").into_owned();
        html = single.replace_all(&html, "").into_owned();
    }

    html
}

/// Clean a CSS value for use in an inline style context.
///
/// Strips `javascript:` schemes, `expression(` calls, and `url(...javascript`
/// payloads, then restricts the result to `[a-zA-Z0-9#%.,\s\-()]`.
pub fn sanitize_css_value(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let value = JAVASCRIPT_SCHEME.replace_all(input, "");
    let value = CSS_EXPRESSION.replace_all(&value, "");
    let value = CSS_URL_JAVASCRIPT.replace_all(&value, "url(");

    value.chars().filter(|c| is_safe_css_char(*c)).collect()
}

fn is_safe_css_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '#' | '%' | '.' | ',' | '-' | '(' | ')')
}

/// Whether a URL passes the scheme allow-list.
///
/// Safe: `http:`, `https:`, `mailto:`, `tel:`, fragment-only, absolute or
/// explicit-relative paths, and any value with no `:` at all.
pub fn url_is_safe(url: &str) -> bool {
    let trimmed = url.trim().to_lowercase();
    SAFE_SCHEMES.iter().any(|scheme| trimmed.starts_with(scheme))
        || trimmed.starts_with('/')
        || trimmed.starts_with("./")
        || !trimmed.contains(':')
}

/// Pass a safe URL through unchanged; replace anything else with `"#"`.
///
/// Rejection logs a warning naming the original value. Empty input yields
/// `"#"`. Idempotent: a value that survives once survives again.
pub fn sanitize_url(url: &str) -> String {
    if url.is_empty() {
        return "#".to_string();
    }
    if url_is_safe(url) {
        url.to_string()
    } else {
        output::warn(&format!("potentially unsafe URL blocked: {url}"));
        "#".to_string()
    }
}
