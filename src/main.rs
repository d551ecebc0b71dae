use clap::{Parser, Subcommand};
use landgen::{builder, config, output, scaffold, screenshot, watch};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "landgen")]
#[command(about = "Config-driven generator for marketing landing pages")]
#[command(long_about = "\
Config-driven generator for marketing landing pages

A landing is a config.json listing sections; sections are reusable Jinja
templates in a shared pool with their own defaults and stylesheet. Builds
render, sanitize, and assemble them into static pages under projects/.

Project structure:

  landings/<name>/
  ├── config.json                  # Landing definition (sections or pages)
  ├── js/                          # Landing-local custom scripts (optional)
  └── assets/                      # Landing-local images etc. (optional)
  sections/<type>/
  ├── <type>.html                  # Jinja template
  ├── variables.json               # Default variables (optional)
  └── <type>.css                   # Section stylesheet (optional)
  assets/
  ├── css/                         # Shared base stylesheets (required)
  ├── js/                          # Shared scripts (required)
  └── icons/                       # Shared icons (optional)
  projects/<name>/                 # Build output

Run 'landgen create <name>' to scaffold a new landing.")]
#[command(version)]
struct Cli {
    /// Project root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new landing from a template
    Create {
        /// Landing name (alphanumeric, hyphens, underscores)
        name: String,
        /// Scaffold template: quiz-funnel or single-page
        #[arg(long, default_value = "quiz-funnel")]
        template: String,
    },
    /// Build a landing into projects/<name>/
    Build {
        /// Landing name
        name: String,
        /// Rebuild automatically when inputs change
        #[arg(long)]
        watch: bool,
    },
    /// Validate a landing's config without building
    Validate {
        /// Landing name
        name: String,
    },
    /// List all landings
    List,
    /// Screenshot a built page with headless Chrome
    Screenshot {
        /// Landing name
        name: String,
        /// Page file within the build output
        #[arg(long, default_value = "index.html")]
        page: String,
        /// Viewport preset: desktop, tablet, or mobile
        #[arg(long, default_value = "desktop")]
        device: String,
        /// Viewport width in pixels (overrides --device)
        #[arg(long)]
        width: Option<u32>,
        /// Output PNG path (default: screenshots/<name>/<page>-<width>.png)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Capture the full scroll height instead of one viewport
        #[arg(long)]
        full_page: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Create { name, template } => {
            let dir = scaffold::create(&cli.root, &name, &template)?;
            println!("Created landing \"{name}\" at {}", dir.display());
            println!("Next: edit {}/config.json, then run: landgen build {name}", dir.display());
        }
        Command::Build { name, watch: watch_mode } => {
            if watch_mode {
                watch::watch(&cli.root, &name)?;
            } else {
                let builder = builder::LandingBuilder::new(&cli.root, &name)?;
                let result = builder.build()?;
                output::print_build_summary(&result);
            }
        }
        Command::Validate { name } => {
            // Construction runs the full validation pass.
            let builder = builder::LandingBuilder::new(&cli.root, &name)?;
            println!(
                "Config is valid: {} ({})",
                builder.name(),
                if builder.config().is_multi_page() {
                    format!("{} pages", builder.config().pages.as_ref().map_or(0, Vec::len))
                } else {
                    "single page".to_string()
                }
            );
        }
        Command::List => {
            output::print_landing_list(&collect_landings(&cli.root)?);
        }
        Command::Screenshot {
            name,
            page,
            device,
            width,
            output: output_path,
            full_page,
        } => {
            let name = builder::sanitize_landing_name(&cli.root, &name)?;
            let (preset_width, preset_height) =
                screenshot::device_size(&device).ok_or_else(|| {
                    format!(
                        "unknown device \"{device}\" (available: {})",
                        screenshot::DEVICE_PRESETS
                            .map(|(name, _, _)| name)
                            .join(", ")
                    )
                })?;
            let width = width.unwrap_or(preset_width);

            let html = cli.root.join("projects").join(&name).join(&page);
            let page_stem = page.strip_suffix(".html").unwrap_or(&page);
            let out = output_path.unwrap_or_else(|| {
                cli.root
                    .join("screenshots")
                    .join(&name)
                    .join(format!("{page_stem}-{width}.png"))
            });

            screenshot::capture(&html, &out, width, preset_height, full_page)?;
            println!("Screenshot saved: {}", out.display());
        }
    }

    Ok(())
}

/// Scan `landings/` for directories with a config.json.
///
/// Lenient on purpose: a landing with a broken config still shows up in the
/// list (with zero pages) so the user can find and fix it.
fn collect_landings(root: &std::path::Path) -> std::io::Result<Vec<output::LandingSummary>> {
    let landings_dir = root.join("landings");
    let mut landings = Vec::new();
    if !landings_dir.exists() {
        return Ok(landings);
    }
    let mut entries: Vec<_> = std::fs::read_dir(&landings_dir)?
        .filter_map(Result::ok)
        .filter(|e| e.path().join("config.json").exists())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let summary = match config::load_config(&entry.path().join("config.json")) {
            Ok(config) => output::LandingSummary {
                pages: config.pages.as_ref().map_or(1, Vec::len),
                theme: config.theme.clone(),
                name,
            },
            Err(_) => output::LandingSummary {
                name,
                pages: 0,
                theme: None,
            },
        };
        landings.push(summary);
    }
    Ok(landings)
}
