//! Shared test utilities for the landgen test suite.
//!
//! Provides project-tree fixtures (section pool, shared assets, landing
//! configs) built directly in temp directories, so each test gets an
//! isolated root it can mutate freely.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project();
//! write_landing_config(tmp.path(), "demo",
//!     r#"{ "name": "Demo", "sections": [ { "type": "hero" } ] }"#);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a minimal project root: shared assets plus a `hero` section with a
/// template and stylesheet.
///
/// The shared assets are placeholder files; the build only checks presence
/// and copies bytes, never parses them.
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_shared_assets(tmp.path());
    write_section(
        tmp.path(),
        "hero",
        "<section class=\"hero\"><h1>{{ headline }}</h1></section>",
        Some(r#"{ "headline": "Hello" }"#),
        Some(".hero { color: black; }"),
    );
    tmp
}

/// Create the base stylesheet and script set every build requires.
pub fn write_shared_assets(root: &Path) {
    let css = root.join("assets/css");
    let js = root.join("assets/js");
    fs::create_dir_all(&css).unwrap();
    fs::create_dir_all(&js).unwrap();
    for sheet in ["bootstrap.min.css", "base-styles.css", "common.css"] {
        fs::write(css.join(sheet), format!("/* {sheet} */")).unwrap();
    }
    for script in ["bootstrap.bundle.min.js", "common.js"] {
        fs::write(js.join(script), format!("// {script}")).unwrap();
    }
}

/// Create `sections/<section_type>/` with a template and optional defaults
/// and stylesheet.
pub fn write_section(
    root: &Path,
    section_type: &str,
    template: &str,
    variables_json: Option<&str>,
    css: Option<&str>,
) -> PathBuf {
    let dir = root.join("sections").join(section_type);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{section_type}.html")), template).unwrap();
    if let Some(variables) = variables_json {
        fs::write(dir.join("variables.json"), variables).unwrap();
    }
    if let Some(css) = css {
        fs::write(dir.join(format!("{section_type}.css")), css).unwrap();
    }
    dir
}

/// Create `landings/<name>/config.json` with the given JSON text.
pub fn write_landing_config(root: &Path, name: &str, json: &str) -> PathBuf {
    let dir = root.join("landings").join(name);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    fs::write(&path, json).unwrap();
    path
}

// =========================================================================
// JSON helpers
// =========================================================================

/// Parse a JSON object literal into the map type section content uses.
///
/// Panics on malformed input; tests pass literals.
pub fn json_map(json: &str) -> serde_json::Map<String, serde_json::Value> {
    match serde_json::from_str(json).unwrap() {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
