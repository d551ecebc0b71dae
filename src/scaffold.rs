//! Scaffolding for `landgen create`.
//!
//! Templates are plain JSON values built in code and written as a pretty
//! printed `config.json`; the created landing builds immediately against the
//! stock section pool and is meant to be filled with real content afterward.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::builder::{self, BuildError};

/// Names accepted by `--template`, in the order they are advertised.
pub const TEMPLATE_NAMES: [&str; 2] = ["quiz-funnel", "single-page"];

/// Create `landings/<name>/config.json` from a named template.
///
/// Returns the created landing directory. Fails if the name is invalid, the
/// template is unknown, or the landing already exists.
pub fn create(root: &Path, name: &str, template: &str) -> Result<PathBuf, BuildError> {
    let name = builder::sanitize_landing_name(root, name)?;

    let mut config = match template {
        "quiz-funnel" => quiz_funnel_config(),
        "single-page" => single_page_config(),
        _ => {
            return Err(BuildError::UnknownTemplate {
                name: template.to_string(),
                available: TEMPLATE_NAMES.join(", "),
            });
        }
    };

    let landing_dir = root.join("landings").join(&name);
    if landing_dir.exists() {
        return Err(BuildError::LandingExists(name, landing_dir));
    }

    config["name"] = json!(format!("{name} Landing"));
    config["meta"]["title"] = json!(title_case(&name));

    fs::create_dir_all(&landing_dir)?;
    fs::write(
        landing_dir.join("config.json"),
        serde_json::to_string_pretty(&config)?,
    )?;

    Ok(landing_dir)
}

/// `my-quiz_2` becomes `My Quiz 2`.
fn title_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Seven-page quiz flow: index, four question pages, a contact form, and a
/// thank-you page.
fn quiz_funnel_config() -> Value {
    json!({
        "name": "",
        "theme": "default",
        "lang": "de",
        "meta": { "title": "", "description": "", "keywords": "" },
        "scripts": ["quiz.js"],
        "pages": [
            {
                "filename": "index.html",
                "title": "",
                "sections": [
                    { "type": "hero", "content": {} },
                    { "type": "promotional", "content": {} },
                    { "type": "benefits", "content": { "items": [] } },
                    { "type": "gallery", "content": { "images": [] } },
                    { "type": "process", "content": { "steps": [] } },
                    { "type": "faq", "content": { "items": [] } },
                    { "type": "services", "content": { "items": [] } },
                    { "type": "about", "content": {} },
                    { "type": "footer", "content": {} },
                    { "type": "legal-footer", "content": { "links": [] } }
                ]
            },
            {
                "filename": "quiz-1.html",
                "sections": [
                    { "type": "quiz-header", "content": { "progress": "Weiter zum Gutschein" } },
                    { "type": "quiz-question", "content": { "questionId": "q1", "options": [] } },
                    { "type": "legal-footer", "content": { "links": [] } }
                ]
            },
            {
                "filename": "quiz-2.html",
                "sections": [
                    { "type": "quiz-header", "content": { "progress": "Noch 3 Fragen bis zum Gutschein" } },
                    { "type": "quiz-question", "content": { "questionId": "q2", "options": [] } },
                    { "type": "legal-footer", "content": { "links": [] } }
                ]
            },
            {
                "filename": "quiz-3.html",
                "sections": [
                    { "type": "quiz-header", "content": { "progress": "Noch 2 Fragen bis zum Gutschein" } },
                    { "type": "quiz-question", "content": { "questionId": "q3", "options": [] } },
                    { "type": "legal-footer", "content": { "links": [] } }
                ]
            },
            {
                "filename": "quiz-4.html",
                "sections": [
                    { "type": "quiz-header", "content": { "progress": "Noch 1 Frage bis zum Gutschein" } },
                    { "type": "quiz-question", "content": { "questionId": "q4", "options": [] } },
                    { "type": "legal-footer", "content": { "links": [] } }
                ]
            },
            {
                "filename": "quiz-form.html",
                "sections": [
                    { "type": "quiz-header", "content": { "progress": "Klasse, jetzt zum Gutschein" } },
                    { "type": "quiz-form", "content": {} },
                    { "type": "footer", "content": {} },
                    { "type": "legal-footer", "content": { "links": [] } }
                ]
            },
            {
                "filename": "thank-you.html",
                "sections": [
                    { "type": "quiz-header", "content": {} },
                    { "type": "thank-you-hero", "content": {} },
                    { "type": "author-footer", "content": {} },
                    { "type": "footer", "content": {} },
                    { "type": "legal-footer", "content": { "links": [] } }
                ]
            }
        ]
    })
}

fn single_page_config() -> Value {
    json!({
        "name": "",
        "theme": "default",
        "lang": "de",
        "meta": { "title": "", "description": "", "keywords": "" },
        "sections": [
            { "type": "hero", "content": {} },
            { "type": "about", "content": {} },
            { "type": "footer", "content": {} },
            { "type": "legal-footer", "content": { "links": [] } }
        ]
    })
}
