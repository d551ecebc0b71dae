//! Section template loading and rendering.
//!
//! A section is a directory under `sections/` named after its type:
//!
//! ```text
//! sections/hero/
//! ├── hero.html        # minijinja template (required)
//! ├── variables.json   # default variables (optional)
//! └── hero.css         # stylesheet, linked when present (optional)
//! ```
//!
//! Rendering merges config `content` over the defaults with shallow
//! semantics — an override replaces the default of the same key wholesale,
//! nested structures are not deep-merged — and evaluates the template with
//! HTML auto-escaping on. Three filters route values through the sanitizers
//! and mark the result safe so the engine does not escape it a second time:
//!
//! ```html
//! <div>{{ body | safe_html }}</div>
//! <a href="{{ cta.href | safe_url }}">{{ cta.label }}</a>
//! <div style="background-color: {{ accent | safe_css }}">
//! ```
//!
//! Equality branching is the engine's own `{% if layout == "wide" %}` /
//! `{% if layout != "wide" %}`. The environment is built per render call;
//! there is no process-wide helper registration to keep in sync.

use minijinja::value::Value;
use minijinja::{AutoEscape, Environment};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::sanitize;

#[derive(Error, Debug)]
pub enum SectionError {
    /// Fatal: a referenced template does not exist. There is no silent skip.
    #[error("template not found: {0}")]
    TemplateNotFound(PathBuf),
    #[error("invalid variables.json for section \"{section}\": {source}")]
    Defaults {
        section: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Access to the on-disk section template collection.
#[derive(Debug, Clone)]
pub struct SectionLibrary {
    root: PathBuf,
}

impl SectionLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Section types known to this library: the subdirectory names under the
    /// sections root. A missing root yields the empty set.
    pub fn known_types(&self) -> BTreeSet<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return BTreeSet::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }

    pub fn template_path(&self, section_type: &str) -> PathBuf {
        self.root
            .join(section_type)
            .join(format!("{section_type}.html"))
    }

    pub fn stylesheet_path(&self, section_type: &str) -> PathBuf {
        self.root
            .join(section_type)
            .join(format!("{section_type}.css"))
    }

    pub fn has_stylesheet(&self, section_type: &str) -> bool {
        self.stylesheet_path(section_type).exists()
    }

    /// Render a section's template against its defaults merged with
    /// `overrides`.
    pub fn render(
        &self,
        section_type: &str,
        overrides: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, SectionError> {
        let template_path = self.template_path(section_type);
        if !template_path.exists() {
            return Err(SectionError::TemplateNotFound(template_path));
        }
        let source = fs::read_to_string(&template_path)?;

        let mut variables = self.load_defaults(section_type)?;
        for (key, value) in overrides {
            variables.insert(key.clone(), value.clone());
        }

        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        register_safety_filters(&mut env);

        let template = env.template_from_str(&source)?;
        let html = template.render(Value::from_serialize(&variables))?;
        Ok(html)
    }

    /// Default variables from `variables.json`, or an empty map when the
    /// file does not exist. Must be a JSON object.
    fn load_defaults(
        &self,
        section_type: &str,
    ) -> Result<serde_json::Map<String, serde_json::Value>, SectionError> {
        let path = self.root.join(section_type).join("variables.json");
        if !path.exists() {
            return Ok(serde_json::Map::new());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|source| SectionError::Defaults {
            section: section_type.to_string(),
            source,
        })
    }
}

/// Register the three context-specific sanitizing output filters.
///
/// Each routes a string through the matching sanitizer and returns a safe
/// string, bypassing auto-escaping — the value is already clean for its
/// context.
fn register_safety_filters(env: &mut Environment<'_>) {
    env.add_filter("safe_html", |value: Value| {
        Value::from_safe_string(sanitize::sanitize_html(value.as_str().unwrap_or_default()))
    });
    env.add_filter("safe_url", |value: Value| {
        Value::from_safe_string(sanitize::sanitize_url(value.as_str().unwrap_or_default()))
    });
    env.add_filter("safe_css", |value: Value| {
        Value::from_safe_string(sanitize::sanitize_css_value(
            value.as_str().unwrap_or_default(),
        ))
    });
}
