//! Page screenshots through a headless Chrome session.
//!
//! One browser launch per invocation: screenshots are an occasional design
//! review step, not a hot path, so there is nothing to keep warm. Pages are
//! loaded over `file://` straight from the build output, which means the
//! landing must be built before it can be captured.

use std::path::Path;
use std::thread;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions};
use thiserror::Error;

/// Viewport presets selectable with `--device`.
pub const DEVICE_PRESETS: [(&str, u32, u32); 3] = [
    ("desktop", 1440, 900),
    ("tablet", 768, 1024),
    ("mobile", 375, 812),
];

/// Look up a preset viewport by device name.
pub fn device_size(device: &str) -> Option<(u32, u32)> {
    DEVICE_PRESETS
        .iter()
        .find(|(name, _, _)| *name == device)
        .map(|(_, w, h)| (*w, *h))
}

#[derive(Error, Debug)]
pub enum ScreenshotError {
    #[error("page not found: {0} (build the landing first)")]
    PageNotFound(std::path::PathBuf),
    #[error("browser error: {0}")]
    Browser(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render `html` in Chrome at the given viewport and write a PNG to `output`.
///
/// With `full_page` the window is resized to the document's scroll height
/// before capture, so long landing pages come out in one image instead of a
/// viewport-sized crop.
pub fn capture(
    html: &Path,
    output: &Path,
    width: u32,
    height: u32,
    full_page: bool,
) -> Result<(), ScreenshotError> {
    if !html.exists() {
        return Err(ScreenshotError::PageNotFound(html.to_path_buf()));
    }
    let html = html.canonicalize()?;
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let browser = Browser::new(LaunchOptions {
        window_size: Some((width, height)),
        ..Default::default()
    })
    .map_err(|e| ScreenshotError::Browser(e.to_string()))?;

    let tab = browser
        .new_tab()
        .map_err(|e| ScreenshotError::Browser(e.to_string()))?;
    tab.navigate_to(&format!("file://{}", html.display()))
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| ScreenshotError::Browser(e.to_string()))?;

    if full_page {
        let scroll_height = tab
            .evaluate("document.body.scrollHeight", false)
            .map_err(|e| ScreenshotError::Browser(e.to_string()))?
            .value
            .and_then(|v| v.as_f64())
            .unwrap_or(height as f64);
        let capture_height = scroll_height.max(height as f64);
        tab.set_bounds(Bounds::Normal {
            left: None,
            top: None,
            width: Some(width as f64),
            height: Some(capture_height),
        })
        .map_err(|e| ScreenshotError::Browser(e.to_string()))?;
        // Let lazy layout and web fonts settle after the resize.
        thread::sleep(Duration::from_millis(250));
    }

    let png = tab
        .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
        .map_err(|e| ScreenshotError::Browser(e.to_string()))?;
    std::fs::write(output, png)?;

    Ok(())
}
