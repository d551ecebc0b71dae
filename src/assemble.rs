//! Page assembly: ordered sections into one body fragment.
//!
//! Section order in the config is the vertical layout of the page, so
//! assembly is strictly sequential and order-preserving. Alongside the
//! markup, the assembler collects the stylesheet names the page needs —
//! one `<type>.css` per section type that actually ships a stylesheet,
//! deduplicated in first-seen order.

use crate::config::SectionRef;
use crate::section::{SectionError, SectionLibrary};

/// A page body ready for the layout wrapper.
#[derive(Debug)]
pub struct AssembledPage {
    /// Concatenated section markup, blank-line separated.
    pub html: String,
    /// Stylesheet filenames required by this page, first-seen order.
    pub css: Vec<String>,
    /// Page-specific title, when the page spec carried one.
    pub title: Option<String>,
}

/// Render each section in order and collect the page's stylesheet set.
///
/// A missing `content` mapping renders against the section's defaults alone.
/// Any section failure aborts the whole page.
pub fn assemble(
    library: &SectionLibrary,
    sections: &[SectionRef],
    title: Option<&str>,
) -> Result<AssembledPage, SectionError> {
    let mut html = String::new();
    let mut css: Vec<String> = Vec::new();

    for section in sections {
        let section_type = section.section_type.as_deref().unwrap_or_default();
        let rendered = library.render(section_type, &section.content)?;
        html.push_str(&rendered);
        html.push_str("\n\n");

        if library.has_stylesheet(section_type) {
            let filename = format!("{section_type}.css");
            if !css.contains(&filename) {
                css.push(filename);
            }
        }
    }

    Ok(AssembledPage {
        html,
        css,
        title: title.map(str::to_string),
    })
}
