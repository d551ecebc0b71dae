//! # Landgen
//!
//! A config-driven generator for marketing landing pages. A landing is a
//! `config.json` that lists sections; sections are small Jinja templates in a
//! shared pool with their own default variables and stylesheet. The generator
//! renders, sanitizes, and assembles them into complete static pages.
//!
//! # Architecture: One Linear Pipeline
//!
//! Every build runs the same stages over one landing:
//!
//! ```text
//! 1. Validate   config.json        →  aggregate error or go
//! 2. Assemble   sections/ + config →  body HTML + stylesheet list
//! 3. Wrap       body               →  full document (head, CSP, scripts)
//! 4. Copy       assets/            →  projects/<name>/
//! ```
//!
//! Validation is front-loaded and accumulating: a broken config reports every
//! problem in one run instead of one problem per run. After validation the
//! pipeline has no decisions left to make, only work to do.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.json` data model and loading (size cap, JSON errors) |
//! | [`validate`] | Accumulating structural and URL validation against the section pool |
//! | [`sanitize`] | HTML/CSS/URL sanitizers applied to template output |
//! | [`section`] | Section pool: template lookup, defaults merge, rendering |
//! | [`assemble`] | Orders rendered sections into a page body, collects stylesheets |
//! | [`layout`] | Wraps a body in the document shell: meta, CSP, base assets |
//! | [`builder`] | Build orchestration, output layout, asset copying |
//! | [`watch`] | Rebuild-on-change loop for `build --watch` |
//! | [`scaffold`] | `create` templates (quiz funnel, single page) |
//! | [`screenshot`] | Headless Chrome captures at device viewports |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Runtime Templates Over Compile-Time HTML
//!
//! Sections are [MiniJinja](https://docs.rs/minijinja) templates loaded from
//! disk, not compiled-in markup. The whole point of the section pool is that
//! designers add and edit sections without touching the generator; a rebuild
//! of the binary per design change would defeat that. Auto-escaping is on for
//! every render, so interpolated content is HTML-escaped unless a template
//! explicitly routes it through one of the sanitizing filters.
//!
//! ## Sanitize at the Seams
//!
//! Content values come from hand-edited JSON and are treated as untrusted.
//! Escaping handles the common case; the `safe_html`, `safe_url`, and
//! `safe_css` filters exist for templates that must emit markup, link
//! targets, or style values from content. The sanitizer is a denylist over
//! known-dangerous constructs, which is the right fit for trusted-but-sloppy
//! input; it is not a boundary against a hostile author, and the generated
//! pages additionally carry a restrictive Content-Security-Policy.
//!
//! ## Fail Loud, Warn Quiet
//!
//! Anything that would ship a broken page fails the build: missing section
//! templates, missing shared assets, invalid config. Anything cosmetic is a
//! stderr warning and the build continues: missing meta description, a custom
//! script that cannot be found, an unsafe URL rewritten to `#`.
//!
//! ## The Output Is Just Files
//!
//! A built landing under `projects/<name>/` is plain HTML, CSS, and a couple
//! of scripts. No server, no framework, no build step at deploy time; any
//! static host or CDN can serve it as-is.

pub mod assemble;
pub mod builder;
pub mod config;
pub mod layout;
pub mod output;
pub mod sanitize;
pub mod scaffold;
pub mod screenshot;
pub mod section;
pub mod validate;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
