//! Build orchestration: validate, assemble, wrap, write, copy.
//!
//! One [`LandingBuilder`] per build invocation. Construction front-loads
//! everything that can fail before rendering: the landing-name guard, config
//! load (existence, size cap, JSON), and full validation. A constructed
//! builder holds an immutable config; [`LandingBuilder::build`] derives all
//! output from it.
//!
//! Two linear paths, selected by config shape:
//!
//! ```text
//! single-page: assemble root sections → wrap → index.html → copy assets
//! multi-page:  per page assemble → wrap (page title/scripts) → <filename>
//!              → copy assets incl. union of custom scripts
//! ```
//!
//! Any failure aborts the whole build. A failed multi-page build may have
//! written some page files already; partial output directories are not valid
//! build products.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::assemble::{self, AssembledPage};
use crate::config::{self, ConfigError, LandingConfig};
use crate::layout::{self, LayoutOptions};
use crate::output;
use crate::section::{SectionError, SectionLibrary};
use crate::validate::{self, ValidationError};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid landing name: {0}")]
    InvalidName(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error("missing required asset: {0}")]
    MissingAsset(PathBuf),
    #[error("unknown template: {name} (available: {available})")]
    UnknownTemplate { name: String, available: String },
    #[error("landing \"{0}\" already exists at {1}")]
    LandingExists(String, PathBuf),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a successful build.
#[derive(Debug)]
pub enum BuildResult {
    SinglePage {
        output_dir: PathBuf,
        index_path: PathBuf,
    },
    MultiPage {
        output_dir: PathBuf,
        pages: Vec<PathBuf>,
    },
}

impl BuildResult {
    pub fn output_dir(&self) -> &Path {
        match self {
            BuildResult::SinglePage { output_dir, .. } => output_dir,
            BuildResult::MultiPage { output_dir, .. } => output_dir,
        }
    }
}

/// Shared base scripts copied for every landing.
const SHARED_SCRIPTS: [&str; 2] = ["bootstrap.bundle.min.js", "common.js"];
/// Shared base stylesheets copied for every landing.
const SHARED_STYLESHEETS: [&str; 3] = ["bootstrap.min.css", "base-styles.css", "common.css"];

/// Guard the landing identifier before any filesystem access.
///
/// Only `[A-Za-z0-9_-]+` is accepted, and the joined landing directory must
/// still resolve inside the landings root. The character filter already rules
/// out traversal; the containment check stays as a second lock on the door.
pub fn sanitize_landing_name(root: &Path, name: &str) -> Result<String, BuildError> {
    if name.is_empty() {
        return Err(BuildError::InvalidName(
            "landing name cannot be empty".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(BuildError::InvalidName(format!(
            "\"{name}\" — only alphanumeric characters, hyphens, and underscores are allowed"
        )));
    }
    let landings_root = root.join("landings");
    if !landings_root.join(name).starts_with(&landings_root) {
        return Err(BuildError::InvalidName(format!(
            "\"{name}\" — path traversal detected"
        )));
    }
    Ok(name.to_string())
}

/// One build invocation for one landing.
#[derive(Debug)]
pub struct LandingBuilder {
    name: String,
    root: PathBuf,
    landing_dir: PathBuf,
    output_dir: PathBuf,
    library: SectionLibrary,
    config: LandingConfig,
}

impl LandingBuilder {
    /// Guard the name, load the config, validate it, and surface metadata
    /// warnings. No output is written here.
    pub fn new(root: &Path, name: &str) -> Result<Self, BuildError> {
        let name = sanitize_landing_name(root, name)?;
        let landing_dir = root.join("landings").join(&name);
        let config = config::load_config(&landing_dir.join("config.json"))?;
        let library = SectionLibrary::new(root.join("sections"));
        validate::validate(&config, &library.known_types())?;
        for warning in validate::meta_warnings(&config) {
            output::warn(&warning);
        }

        Ok(Self {
            output_dir: root.join("projects").join(&name),
            root: root.to_path_buf(),
            landing_dir,
            library,
            config,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &LandingConfig {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run the full pipeline and report what was written.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        fs::create_dir_all(&self.output_dir)?;
        if self.config.is_multi_page() {
            self.build_multi_page()
        } else {
            self.build_single_page()
        }
    }

    fn build_single_page(&self) -> Result<BuildResult, BuildError> {
        println!("==> Building landing: {}", self.name);

        let sections = self.config.sections.as_deref().unwrap_or_default();
        let page = assemble::assemble(&self.library, sections, None)?;
        let html = layout::wrap(&self.config, &page.html, &page.css, &LayoutOptions::default());

        let index_path = self.output_dir.join("index.html");
        fs::write(&index_path, html)?;
        println!("Generated index.html");

        self.copy_assets(&[])?;

        Ok(BuildResult::SinglePage {
            output_dir: self.output_dir.clone(),
            index_path,
        })
    }

    fn build_multi_page(&self) -> Result<BuildResult, BuildError> {
        println!("==> Building multi-page landing: {}", self.name);

        let page_specs = self.config.pages.as_deref().unwrap_or_default();

        // First pass assembles every page so the stylesheet union is known;
        // each written page links the union, not just its own set.
        let mut assembled: Vec<(&str, AssembledPage, Vec<String>)> = Vec::new();
        let mut all_css: Vec<String> = Vec::new();
        let mut custom_scripts: Vec<String> = self.config.scripts.clone();

        for (index, spec) in page_specs.iter().enumerate() {
            let filename = spec.filename.as_deref().unwrap_or_default();
            println!("  Page {}: {}", index + 1, filename);

            let sections = spec.sections.as_deref().unwrap_or_default();
            let page = assemble::assemble(&self.library, sections, spec.title.as_deref())?;
            for css in &page.css {
                if !all_css.contains(css) {
                    all_css.push(css.clone());
                }
            }

            let mut page_scripts = self.config.scripts.clone();
            for script in &spec.scripts {
                page_scripts.push(script.clone());
                if !custom_scripts.contains(script) {
                    custom_scripts.push(script.clone());
                }
            }
            assembled.push((filename, page, page_scripts));
        }

        let mut written = Vec::new();
        for (filename, page, page_scripts) in &assembled {
            let options = LayoutOptions {
                title: page.title.as_deref(),
                scripts: page_scripts,
            };
            let html = layout::wrap(&self.config, &page.html, &all_css, &options);
            let page_path = self.output_dir.join(filename);
            fs::write(&page_path, html)?;
            println!("Generated {filename}");
            written.push(page_path);
        }

        self.copy_assets(&custom_scripts)?;

        Ok(BuildResult::MultiPage {
            output_dir: self.output_dir.clone(),
            pages: written,
        })
    }

    /// Copy the shared asset set, every referenced section stylesheet, the
    /// landing's custom scripts, and optional icon/asset trees.
    fn copy_assets(&self, custom_scripts: &[String]) -> Result<(), BuildError> {
        let css_dir = self.output_dir.join("css");
        let js_dir = self.output_dir.join("js");
        let assets_dir = self.output_dir.join("assets");
        fs::create_dir_all(&css_dir)?;
        fs::create_dir_all(&js_dir)?;
        fs::create_dir_all(&assets_dir)?;

        // Shared base set is required; a broken checkout fails loudly.
        for sheet in SHARED_STYLESHEETS {
            copy_required(&self.root.join("assets/css").join(sheet), &css_dir.join(sheet))?;
        }
        for script in SHARED_SCRIPTS {
            copy_required(&self.root.join("assets/js").join(script), &js_dir.join(script))?;
        }

        // Section stylesheets, each copied once however often referenced.
        let mut copied: Vec<&str> = Vec::new();
        for section in self.config.all_sections() {
            let Some(section_type) = section.section_type.as_deref() else {
                continue;
            };
            if copied.contains(&section_type) {
                continue;
            }
            copied.push(section_type);
            if self.library.has_stylesheet(section_type) {
                fs::copy(
                    self.library.stylesheet_path(section_type),
                    css_dir.join(format!("{section_type}.css")),
                )?;
                println!("  Copied {section_type}.css");
            }
        }

        // Custom scripts: landing-local wins over the shared pool; a script
        // found in neither is a warning, not a failure.
        for script in custom_scripts {
            let local = self.landing_dir.join("js").join(script);
            let shared = self.root.join("assets/js").join(script);
            if local.exists() {
                fs::copy(&local, js_dir.join(script))?;
                println!("  Copied {script}");
            } else if shared.exists() {
                fs::copy(&shared, js_dir.join(script))?;
                println!("  Copied {script} (from shared assets)");
            } else {
                output::warn(&format!("script not found, skipped: {script}"));
            }
        }

        let icons = self.root.join("assets/icons");
        if icons.exists() {
            copy_tree(&icons, &assets_dir.join("icons"))?;
            println!("  Copied shared icons");
        }

        let landing_assets = self.landing_dir.join("assets");
        if landing_assets.exists() {
            copy_tree(&landing_assets, &assets_dir)?;
            println!("  Copied landing assets");
        }

        Ok(())
    }
}

fn copy_required(src: &Path, dst: &Path) -> Result<(), BuildError> {
    if !src.exists() {
        return Err(BuildError::MissingAsset(src.to_path_buf()));
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Copy a directory tree, creating destination directories as needed.
fn copy_tree(src: &Path, dst: &Path) -> Result<(), BuildError> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(std::io::Error::other)?;
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{setup_project, write_landing_config, write_section};

    // =========================================================================
    // Landing-name guard
    // =========================================================================

    #[test]
    fn name_guard_accepts_safe_names() {
        let root = Path::new("/tmp/none");
        for name in ["demo", "my-landing", "quiz_2", "A1"] {
            assert_eq!(sanitize_landing_name(root, name).unwrap(), name);
        }
    }

    #[test]
    fn name_guard_rejects_traversal_before_filesystem_access() {
        // Root deliberately does not exist: rejection must not touch the fs.
        let root = Path::new("/nonexistent/landgen-root");
        for name in ["../../etc", "..", "a/b", "a\\b", "x.json", "", "a b"] {
            let result = LandingBuilder::new(root, name);
            assert!(
                matches!(result, Err(BuildError::InvalidName(_))),
                "accepted bad name {name:?}"
            );
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn missing_config_is_config_not_found() {
        let tmp = setup_project();
        let result = LandingBuilder::new(tmp.path(), "ghost");
        assert!(matches!(
            result,
            Err(BuildError::Config(ConfigError::NotFound(_)))
        ));
    }

    #[test]
    fn invalid_config_aggregates_validation_errors() {
        let tmp = setup_project();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "sections": [ { "type": "ghost" } ] }"#,
        );
        let err = LandingBuilder::new(tmp.path(), "demo").unwrap_err();
        let BuildError::Validation(validation) = err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(validation.errors.len(), 2); // missing name + unknown type
    }

    // =========================================================================
    // Single-page end to end
    // =========================================================================

    #[test]
    fn single_page_build_writes_index_html() {
        let tmp = setup_project();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "meta": { "title": "T", "description": "D" },
                 "sections": [ { "type": "hero", "content": {} } ] }"#,
        );

        let builder = LandingBuilder::new(tmp.path(), "demo").unwrap();
        let result = builder.build().unwrap();

        let BuildResult::SinglePage { index_path, .. } = &result else {
            panic!("expected single-page result");
        };
        let html = fs::read_to_string(index_path).unwrap();
        assert!(html.contains("<title>T</title>"));
        // hero ships a stylesheet in the fixture, so it must be linked.
        assert!(html.contains(r#"<link href="css/hero.css""#));
        assert!(
            tmp.path().join("projects/demo/css/hero.css").exists(),
            "section stylesheet not copied"
        );
    }

    #[test]
    fn stylesheet_link_absent_when_section_has_no_css() {
        let tmp = setup_project();
        write_section(tmp.path(), "plain", "<div>plain</div>", None, None);
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "meta": { "title": "T" },
                 "sections": [ { "type": "plain" } ] }"#,
        );

        let result = LandingBuilder::new(tmp.path(), "demo").unwrap().build().unwrap();
        let BuildResult::SinglePage { index_path, .. } = result else {
            panic!("expected single-page result");
        };
        let html = fs::read_to_string(index_path).unwrap();
        assert!(!html.contains("plain.css"));
    }

    #[test]
    fn shared_assets_are_copied() {
        let tmp = setup_project();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "sections": [ { "type": "hero" } ] }"#,
        );

        LandingBuilder::new(tmp.path(), "demo").unwrap().build().unwrap();

        for file in [
            "projects/demo/css/bootstrap.min.css",
            "projects/demo/css/base-styles.css",
            "projects/demo/css/common.css",
            "projects/demo/js/bootstrap.bundle.min.js",
            "projects/demo/js/common.js",
        ] {
            assert!(tmp.path().join(file).exists(), "missing {file}");
        }
    }

    #[test]
    fn missing_shared_asset_fails_the_build() {
        let tmp = setup_project();
        fs::remove_file(tmp.path().join("assets/css/bootstrap.min.css")).unwrap();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "sections": [ { "type": "hero" } ] }"#,
        );

        let result = LandingBuilder::new(tmp.path(), "demo").unwrap().build();
        assert!(matches!(result, Err(BuildError::MissingAsset(_))));
    }

    // =========================================================================
    // Multi-page end to end
    // =========================================================================

    #[test]
    fn multi_page_build_writes_each_page_with_union_css() {
        let tmp = setup_project();
        write_section(tmp.path(), "faq", "<div>faq</div>", None, Some(".faq {}"));
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "meta": { "title": "T" }, "pages": [
                 { "filename": "a.html", "sections": [ { "type": "hero" } ] },
                 { "filename": "b.html", "title": "Page B",
                   "sections": [ { "type": "faq" } ] } ] }"#,
        );

        let result = LandingBuilder::new(tmp.path(), "demo").unwrap().build().unwrap();
        let BuildResult::MultiPage { pages, .. } = &result else {
            panic!("expected multi-page result");
        };
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.html", "b.html"]);

        // Every page links the union of section stylesheets.
        let a = fs::read_to_string(&pages[0]).unwrap();
        let b = fs::read_to_string(&pages[1]).unwrap();
        for doc in [&a, &b] {
            assert!(doc.contains("css/hero.css"));
            assert!(doc.contains("css/faq.css"));
        }
        // Page titles: a falls back to meta.title, b uses its own.
        assert!(a.contains("<title>T</title>"));
        assert!(b.contains("<title>Page B</title>"));
    }

    #[test]
    fn multi_page_scripts_combine_shared_and_per_page() {
        let tmp = setup_project();
        fs::create_dir_all(tmp.path().join("landings/demo/js")).unwrap();
        fs::write(tmp.path().join("landings/demo/js/quiz.js"), "// quiz").unwrap();
        fs::write(tmp.path().join("landings/demo/js/extra.js"), "// extra").unwrap();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "scripts": ["quiz.js"], "pages": [
                 { "filename": "a.html", "sections": [ { "type": "hero" } ] },
                 { "filename": "b.html", "sections": [ { "type": "hero" } ],
                   "scripts": ["extra.js"] } ] }"#,
        );

        let result = LandingBuilder::new(tmp.path(), "demo").unwrap().build().unwrap();
        let BuildResult::MultiPage { pages, .. } = result else {
            panic!("expected multi-page result");
        };

        let a = fs::read_to_string(&pages[0]).unwrap();
        let b = fs::read_to_string(&pages[1]).unwrap();
        assert!(a.contains("js/quiz.js"));
        assert!(!a.contains("js/extra.js"));
        assert!(b.contains("js/quiz.js"));
        assert!(b.contains("js/extra.js"));

        // Both scripts are copied from the landing's js directory.
        assert!(tmp.path().join("projects/demo/js/quiz.js").exists());
        assert!(tmp.path().join("projects/demo/js/extra.js").exists());
    }

    #[test]
    fn unknown_custom_script_is_skipped_not_fatal() {
        let tmp = setup_project();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "scripts": ["nowhere.js"], "pages": [
                 { "filename": "a.html", "sections": [ { "type": "hero" } ] } ] }"#,
        );

        let result = LandingBuilder::new(tmp.path(), "demo").unwrap().build();
        assert!(result.is_ok());
        assert!(!tmp.path().join("projects/demo/js/nowhere.js").exists());
    }

    #[test]
    fn landing_assets_and_icons_are_copied_when_present() {
        let tmp = setup_project();
        fs::create_dir_all(tmp.path().join("assets/icons")).unwrap();
        fs::write(tmp.path().join("assets/icons/star.svg"), "<svg/>").unwrap();
        fs::create_dir_all(tmp.path().join("landings/demo/assets/img")).unwrap();
        fs::write(tmp.path().join("landings/demo/assets/img/dog.jpg"), "jpg").unwrap();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "sections": [ { "type": "hero" } ] }"#,
        );

        LandingBuilder::new(tmp.path(), "demo").unwrap().build().unwrap();

        assert!(tmp.path().join("projects/demo/assets/icons/star.svg").exists());
        assert!(tmp.path().join("projects/demo/assets/img/dog.jpg").exists());
    }

    #[test]
    fn missing_section_template_aborts_build() {
        let tmp = setup_project();
        // Validation passes (directory exists) but the template file is gone.
        fs::create_dir_all(tmp.path().join("sections/broken")).unwrap();
        write_landing_config(
            tmp.path(),
            "demo",
            r#"{ "name": "Demo", "sections": [ { "type": "broken" } ] }"#,
        );

        let result = LandingBuilder::new(tmp.path(), "demo").unwrap().build();
        assert!(matches!(
            result,
            Err(BuildError::Section(SectionError::TemplateNotFound(_)))
        ));
    }
}
