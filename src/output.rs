//! CLI output formatting.
//!
//! All user-facing text lives here as pure `format_*` functions with thin
//! `print_*` wrappers, so tests can assert on strings without capturing
//! stdout. Warnings go to stderr through [`warn`]; everything else goes to
//! stdout.

use std::path::Path;

use crate::builder::BuildResult;

/// Emit a non-fatal warning on stderr.
pub fn warn(message: &str) {
    eprintln!("warning: {message}");
}

/// One row of `landgen list` output.
#[derive(Debug, PartialEq)]
pub struct LandingSummary {
    pub name: String,
    pub pages: usize,
    pub theme: Option<String>,
}

/// Build completion summary, relative to the invocation root where possible.
pub fn format_build_summary(result: &BuildResult) -> String {
    match result {
        BuildResult::SinglePage { output_dir, .. } => {
            format!("Build complete: {}", display_path(output_dir))
        }
        BuildResult::MultiPage { output_dir, pages } => format!(
            "Build complete: {} ({} pages)",
            display_path(output_dir),
            pages.len()
        ),
    }
}

pub fn format_landing_list(landings: &[LandingSummary]) -> String {
    if landings.is_empty() {
        return "No landings found. Create one with: landgen create <name>".to_string();
    }
    let mut out = String::from("Landings\n");
    for landing in landings {
        let pages = if landing.pages == 1 {
            "1 page".to_string()
        } else {
            format!("{} pages", landing.pages)
        };
        out.push_str(&format!("  {} ({pages})", landing.name));
        if let Some(theme) = &landing.theme {
            out.push_str(&format!(" [{theme}]"));
        }
        out.push('\n');
    }
    out
}

pub fn print_build_summary(result: &BuildResult) {
    println!("{}", format_build_summary(result));
}

pub fn print_landing_list(landings: &[LandingSummary]) {
    print!("{}", format_landing_list(landings));
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
