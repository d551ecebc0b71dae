//! Landing configuration model and loading.
//!
//! One `config.json` per landing, read once per build and never mutated.
//! Two mutually exclusive shapes:
//!
//! ```text
//! Single-page:  { "name": "...", "sections": [ {"type": "hero", "content": {}} ] }
//! Multi-page:   { "name": "...", "pages": [ {"filename": "index.html", "sections": [...]}, ... ] }
//! ```
//!
//! When both appear, the multi-page form wins. Fields that validation needs
//! to report as missing are `Option` here, so a structurally incomplete
//! document still parses and [`crate::validate`] can accumulate every
//! violation instead of dying on the first one. Only malformed JSON or an
//! oversize file fails at this layer.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config files larger than this are rejected before parsing.
pub const MAX_CONFIG_BYTES: u64 = 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("config file too large (max 1 MiB): {path} is {size} bytes")]
    TooLarge { path: PathBuf, size: u64 },
    #[error("invalid JSON in config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Root configuration for one landing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingConfig {
    /// Landing display name. Required; validation rejects its absence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Document language attribute.
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Theme identifier. Parsed and reported, interpreted by no build step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Head metadata. Absence is warned about, not fatal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    /// Custom script filenames shared by every page of the landing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
    /// Single-page form: ordered sections of the one generated page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionRef>>,
    /// Multi-page form: ordered page specs. Takes precedence over `sections`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageSpec>>,
}

fn default_lang() -> String {
    "de".to_string()
}

impl LandingConfig {
    /// The landing name, or `""` when the config omitted it.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Whether the multi-page form applies. A `pages` array is enough, even
    /// an empty one — emptiness is a validation error, not a shape change.
    pub fn is_multi_page(&self) -> bool {
        self.pages.is_some()
    }

    /// Every section reference across both config shapes, in document order.
    pub fn all_sections(&self) -> Vec<&SectionRef> {
        match (&self.pages, &self.sections) {
            (Some(pages), _) => pages
                .iter()
                .flat_map(|p| p.sections.as_deref().unwrap_or_default())
                .collect(),
            (None, Some(sections)) => sections.iter().collect(),
            (None, None) => Vec::new(),
        }
    }
}

/// Head metadata block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

/// One page of a multi-page landing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSpec {
    /// Output filename, e.g. `quiz-1.html`. Required and unique per config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Page title; overrides `meta.title` for this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionRef>>,
    /// Extra scripts for this page only, on top of the landing-wide set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
}

/// A reference to a section template plus content overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionRef {
    /// Section type; must match a directory under `sections/`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    /// Free-form variable overrides merged over the section's defaults.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub content: serde_json::Map<String, serde_json::Value>,
}

/// Read and parse a landing config.
///
/// Enforces existence and the 1 MiB size cap before parsing; does not
/// validate content — that is [`crate::validate`]'s job, so every structural
/// violation can be reported at once.
pub fn load_config(path: &Path) -> Result<LandingConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let size = fs::metadata(path)?.len();
    if size > MAX_CONFIG_BYTES {
        return Err(ConfigError::TooLarge {
            path: path.to_path_buf(),
            size,
        });
    }
    let content = fs::read_to_string(path)?;
    let config: LandingConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_single_page_config() {
        let config: LandingConfig = serde_json::from_str(
            r#"{
                "name": "Demo",
                "meta": { "title": "T", "description": "D" },
                "sections": [ { "type": "hero", "content": { "headline": "Hi" } } ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.display_name(), "Demo");
        assert!(!config.is_multi_page());
        let sections = config.sections.as_ref().unwrap();
        assert_eq!(sections[0].section_type.as_deref(), Some("hero"));
        assert_eq!(
            sections[0].content.get("headline").unwrap().as_str(),
            Some("Hi")
        );
    }

    #[test]
    fn parse_multi_page_config() {
        let config: LandingConfig = serde_json::from_str(
            r#"{
                "name": "Demo",
                "scripts": ["quiz.js"],
                "pages": [
                    { "filename": "index.html", "sections": [ { "type": "hero" } ] },
                    { "filename": "quiz-1.html", "title": "Quiz", "sections": [],
                      "scripts": ["extra.js"] }
                ]
            }"#,
        )
        .unwrap();

        assert!(config.is_multi_page());
        let pages = config.pages.as_ref().unwrap();
        assert_eq!(pages[0].filename.as_deref(), Some("index.html"));
        assert_eq!(pages[1].scripts, vec!["extra.js"]);
        assert_eq!(config.scripts, vec!["quiz.js"]);
    }

    #[test]
    fn lang_defaults_when_absent() {
        let config: LandingConfig = serde_json::from_str(r#"{ "name": "x" }"#).unwrap();
        assert_eq!(config.lang, "de");
    }

    #[test]
    fn missing_fields_still_parse() {
        // Validation reports the gaps; parsing must not fail on them.
        let config: LandingConfig = serde_json::from_str(r#"{}"#).unwrap();
        assert!(config.name.is_none());
        assert!(config.sections.is_none());
        assert!(config.pages.is_none());
    }

    #[test]
    fn section_content_defaults_to_empty_map() {
        let section: SectionRef = serde_json::from_str(r#"{ "type": "hero" }"#).unwrap();
        assert!(section.content.is_empty());
    }

    #[test]
    fn all_sections_flattens_pages() {
        let config: LandingConfig = serde_json::from_str(
            r#"{
                "pages": [
                    { "filename": "a.html", "sections": [ { "type": "hero" }, { "type": "faq" } ] },
                    { "filename": "b.html", "sections": [ { "type": "footer" } ] }
                ]
            }"#,
        )
        .unwrap();
        let types: Vec<_> = config
            .all_sections()
            .iter()
            .map(|s| s.section_type.as_deref().unwrap())
            .collect();
        assert_eq!(types, vec!["hero", "faq", "footer"]);
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("config.json"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_config_rejects_oversize_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        let padding = "x".repeat((MAX_CONFIG_BYTES + 1) as usize);
        fs::write(&path, format!(r#"{{ "name": "{padding}" }}"#)).unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::TooLarge { .. })));
    }

    #[test]
    fn load_config_rejects_malformed_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ this is not json").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn load_config_reads_valid_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "name": "Demo", "sections": [] }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.display_name(), "Demo");
    }
}
