//! Structural validation of landing configs.
//!
//! [`check`] is a pure accumulator: it walks the whole config and returns
//! every violation it finds, never stopping at the first. [`validate`] wraps
//! the result into a single aggregate [`ValidationError`] whose message
//! enumerates all violations one per line — a config author fixes everything
//! in one round trip instead of playing whack-a-mole.
//!
//! Unsafe URLs inside section `content` are *errors* here even though the
//! renderer would quietly rewrite them to `"#"`. The asymmetry is deliberate
//! defense in depth: reject loudly at validate time, patch silently at render
//! time in case something slipped through.
//!
//! The set of known section types is injected by the caller rather than read
//! from disk, so validation is testable without a sections directory.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::config::{LandingConfig, SectionRef};
use crate::sanitize;

/// Aggregate of every validation failure in a config.
#[derive(Error, Debug)]
#[error("config validation failed:{}", .errors.iter().map(|e| format!("\n  - {e}")).collect::<String>())]
pub struct ValidationError {
    pub errors: Vec<String>,
}

/// Content keys whose string values must pass the URL allow-list.
const URL_KEYS: [&str; 4] = ["link", "href", "src", "url"];

/// Validate a config, failing with one aggregate error listing every
/// violation.
pub fn validate(
    config: &LandingConfig,
    known_types: &BTreeSet<String>,
) -> Result<(), ValidationError> {
    let errors = check(config, known_types);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

/// Collect every structural violation in `config`. Empty result means valid.
pub fn check(config: &LandingConfig, known_types: &BTreeSet<String>) -> Vec<String> {
    let mut errors = Vec::new();

    if config.display_name().is_empty() {
        errors.push("missing or invalid field: name (must be a non-empty string)".to_string());
    }

    match (&config.pages, &config.sections) {
        // Multi-page form wins when both are present.
        (Some(pages), _) => {
            if pages.is_empty() {
                errors.push("pages array cannot be empty".to_string());
            }
            let mut seen_filenames: BTreeSet<&str> = BTreeSet::new();
            for (index, page) in pages.iter().enumerate() {
                let page_no = index + 1;
                match page.filename.as_deref() {
                    None | Some("") => errors.push(format!(
                        "page {page_no}: missing required field \"filename\""
                    )),
                    Some(filename) => {
                        if !seen_filenames.insert(filename) {
                            errors.push(format!(
                                "page {page_no}: duplicate filename \"{filename}\""
                            ));
                        }
                    }
                }
                let context = format!(
                    "page \"{}\"",
                    page.filename.as_deref().unwrap_or("<unnamed>")
                );
                match &page.sections {
                    None => errors.push(format!(
                        "page {page_no} ({}): missing or invalid field \"sections\"",
                        page.filename.as_deref().unwrap_or("<unnamed>")
                    )),
                    Some(sections) => {
                        for (i, section) in sections.iter().enumerate() {
                            check_section(section, i, known_types, &context, &mut errors);
                        }
                    }
                }
            }
        }
        (None, Some(sections)) => {
            if sections.is_empty() {
                errors.push("sections array cannot be empty".to_string());
            }
            for (i, section) in sections.iter().enumerate() {
                check_section(section, i, known_types, "Root", &mut errors);
            }
        }
        (None, None) => {
            errors.push(
                "missing required field: \"sections\" (array) or \"pages\" (array for multi-page)"
                    .to_string(),
            );
        }
    }

    errors
}

/// Non-fatal advisory findings: missing head metadata.
pub fn meta_warnings(config: &LandingConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    match &config.meta {
        None => warnings.push("missing \"meta\" object (title, description, keywords)".to_string()),
        Some(meta) => {
            if meta.title.is_none() {
                warnings.push("missing meta.title".to_string());
            }
            if meta.description.is_none() {
                warnings.push("missing meta.description".to_string());
            }
        }
    }
    warnings
}

fn check_section(
    section: &SectionRef,
    index: usize,
    known_types: &BTreeSet<String>,
    context: &str,
    errors: &mut Vec<String>,
) {
    let label = format!("{context} section {}", index + 1);
    match section.section_type.as_deref() {
        None | Some("") => errors.push(format!("{label}: missing required field \"type\"")),
        Some(section_type) if !known_types.contains(section_type) => {
            let valid: Vec<&str> = known_types.iter().map(String::as_str).collect();
            errors.push(format!(
                "{label}: unknown section type \"{section_type}\". Valid types: {}",
                valid.join(", ")
            ));
        }
        Some(_) => {}
    }

    check_urls(
        &serde_json::Value::Object(section.content.clone()),
        &label,
        errors,
    );
}

/// Recursively scan a content value for URL-bearing keys with unsafe values.
fn check_urls(value: &serde_json::Value, context: &str, errors: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                match val {
                    serde_json::Value::String(s) => {
                        if URL_KEYS.contains(&key.as_str()) && !sanitize::url_is_safe(s) {
                            errors.push(format!(
                                "{context}: potentially unsafe URL in \"{key}\": {s}"
                            ));
                        }
                    }
                    serde_json::Value::Array(items) => {
                        for (i, item) in items.iter().enumerate() {
                            check_urls(item, &format!("{context}[{i}]"), errors);
                        }
                    }
                    serde_json::Value::Object(_) => check_urls(val, context, errors),
                    _ => {}
                }
            }
        }
        serde_json::Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                check_urls(item, &format!("{context}[{i}]"), errors);
            }
        }
        _ => {}
    }
}
