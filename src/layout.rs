//! Document shell around an assembled page body.
//!
//! The body arrives already sanitized at render time and is inserted
//! verbatim; head metadata (title, description, keywords) is *not* otherwise
//! sanitized, so this layer HTML-escapes it mandatorily. The
//! Content-Security-Policy is a fixed allow-list baked into the binary —
//! deliberately not user-configurable.

use crate::config::LandingConfig;

/// CSP directive string emitted on every generated page.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline' https://script.google.com https://cdn.jsdelivr.net; \
    style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net https://fonts.googleapis.com; \
    img-src 'self' https: data:; \
    font-src 'self' https: data:; \
    frame-src https://www.google.com https://maps.google.com; \
    connect-src 'self' https://script.google.com https://script.googleusercontent.com https://cdn.jsdelivr.net";

/// Stylesheets linked on every page, before section stylesheets.
const BASE_STYLESHEETS: [&str; 3] = ["bootstrap.min.css", "base-styles.css", "common.css"];

/// Scripts loaded on every page, before page-specific scripts.
const BASE_SCRIPTS: [&str; 2] = ["bootstrap.bundle.min.js", "common.js"];

/// Per-page knobs for the wrapper.
#[derive(Debug, Default)]
pub struct LayoutOptions<'a> {
    /// Overrides `meta.title` when present (multi-page titles).
    pub title: Option<&'a str>,
    /// Page-specific script filenames, appended after the base set.
    pub scripts: &'a [String],
}

/// Escape the five HTML-significant characters for head/attribute contexts.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body fragment in the full document shell.
///
/// Title resolution: `options.title`, then `meta.title`, then the landing
/// name.
pub fn wrap(
    config: &LandingConfig,
    body: &str,
    section_css: &[String],
    options: &LayoutOptions,
) -> String {
    let meta = config.meta.clone().unwrap_or_default();
    let title = escape_html(
        options
            .title
            .or(meta.title.as_deref())
            .unwrap_or(config.display_name()),
    );
    let description = escape_html(meta.description.as_deref().unwrap_or_default());
    let keywords = escape_html(meta.keywords.as_deref().unwrap_or_default());

    let stylesheet_links: String = BASE_STYLESHEETS
        .iter()
        .map(|s| s.to_string())
        .chain(section_css.iter().cloned())
        .map(|css| format!("  <link href=\"css/{css}\" rel=\"stylesheet\">\n"))
        .collect();

    let script_tags: String = BASE_SCRIPTS
        .iter()
        .map(|s| s.to_string())
        .chain(options.scripts.iter().cloned())
        .map(|js| format!("  <script src=\"js/{js}\"></script>\n"))
        .collect();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         \x20 <meta charset=\"UTF-8\">\n\
         \x20 <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         \x20 <meta name=\"description\" content=\"{description}\">\n\
         \x20 <meta name=\"keywords\" content=\"{keywords}\">\n\
         \x20 <title>{title}</title>\n\
         \x20 <meta http-equiv=\"Content-Security-Policy\" content=\"{csp}\">\n\
         \x20 <meta http-equiv=\"X-Content-Type-Options\" content=\"nosniff\">\n\
         \x20 <meta http-equiv=\"Referrer-Policy\" content=\"strict-origin-when-cross-origin\">\n\
         {stylesheet_links}\
         </head>\n\
         <body>\n\n\
         {body}\n\
         {script_tags}\
         </body>\n\
         </html>\n",
        lang = escape_html(&config.lang),
        csp = CONTENT_SECURITY_POLICY,
    )
}
