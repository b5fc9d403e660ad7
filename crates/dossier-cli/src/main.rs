//! Dossier CLI - normalize descriptions and render panel manifests.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dossier_core::{Brick, Constraints, Event, MouseButton, RecordingCanvas, Rect, Widget};
use dossier_widgets::{
    remove_leading_spaces, CodeLocationsHeader, Description, DescriptionSection, TruncatedList,
};
use dossier_yaml::PanelManifest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dossier")]
#[command(about = "Asset description panel renderer")]
#[command(version)]
struct Cli {
    /// Log more (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a description with its common indentation removed
    Dedent {
        /// Text file to normalize
        file: PathBuf,
    },

    /// Lay out a manifest's panel and print it
    Render {
        /// Path to manifest file
        #[arg(default_value = "panel.yaml")]
        manifest: PathBuf,

        /// Viewport width in pixels
        #[arg(short, long, default_value = "600")]
        width: f32,

        /// Render the description expanded
        #[arg(long)]
        expanded: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        format: Format,
    },

    /// Check YAML manifest validity
    Check {
        /// Path to manifest file
        #[arg(default_value = "panel.yaml")]
        manifest: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// HTML and CSS
    Html,
    /// Draw commands as JSON
    Json,
    /// Disclosure state and heights
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Dedent { file } => dedent(&file),
        Commands::Render {
            manifest,
            width,
            expanded,
            format,
        } => render(&manifest, width, expanded, format),
        Commands::Check { manifest } => check_manifest(&manifest),
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!("dossier={level},dossier_widgets={level}")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

fn dedent(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let normalized = remove_leading_spaces(&text);
    debug!(
        changed = normalized.len() != text.len(),
        "normalized {}",
        path.display()
    );
    print!("{normalized}");
    Ok(())
}

fn load_manifest(path: &Path) -> Result<PanelManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    PanelManifest::from_yaml(&content)
        .with_context(|| format!("Manifest invalid: {}", path.display()))
}

fn check_manifest(path: &Path) -> Result<()> {
    let manifest = load_manifest(path)?;
    let display = manifest.display_config();
    println!("Manifest valid!");
    if let Some(asset) = &manifest.asset {
        println!("  Asset: {asset}");
    }
    println!(
        "  Description: {}",
        if manifest.description.as_deref().is_some_and(|d| !d.is_empty()) {
            "present"
        } else {
            "missing"
        }
    );
    println!("  Max height: {}px", display.max_height);
    println!("  Font size: {}", display.font_size);
    println!("  Related assets: {}", manifest.related_assets.len());
    println!("  Code locations: {}", manifest.code_locations.len());
    Ok(())
}

fn render(path: &Path, width: f32, expanded: bool, format: Format) -> Result<()> {
    anyhow::ensure!(
        width.is_finite() && width > 0.0,
        "width must be a positive number, got {width}"
    );
    let manifest = load_manifest(path)?;
    info!(manifest = %path.display(), width, expanded, "rendering");

    match format {
        Format::Summary => {
            let mut description = Description::optional(manifest.description.clone())
                .with_config(manifest.display_config());
            lay_out(&mut description, width);
            if expanded && description.has_more() {
                description.toggle();
                lay_out(&mut description, width);
            }
            print_summary(&description);
        }
        Format::Html => {
            let mut section = DescriptionSection::from_manifest(&manifest);
            lay_out(&mut section, width);
            if expanded {
                expand(&mut section, width);
            }
            println!("<style>\n{}\n</style>", section.to_css());
            println!("{}", section.to_html());
            if !manifest.related_assets.is_empty() {
                println!("{}", TruncatedList::from_assets(&manifest.related_assets).to_html());
            }
            if !manifest.code_locations.is_empty() {
                println!(
                    "{}",
                    CodeLocationsHeader::new(manifest.code_locations.iter().cloned()).to_html()
                );
            }
        }
        Format::Json => {
            let mut section = DescriptionSection::from_manifest(&manifest);
            lay_out(&mut section, width);
            if expanded {
                expand(&mut section, width);
            }
            let mut canvas = RecordingCanvas::new();
            section.paint(&mut canvas);
            let json = serde_json::to_string_pretty(canvas.commands())
                .context("Failed to serialize draw commands")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn lay_out(widget: &mut dyn Widget, width: f32) {
    let size = widget.measure(Constraints::width(width));
    widget.layout(Rect::new(0.0, 0.0, width, size.height));
}

/// Click the description toggle the way a pointer would.
fn expand(section: &mut DescriptionSection, width: f32) {
    let toggle = section
        .children()
        .iter()
        .flat_map(|child| child.children())
        .find(|w| w.test_id() == Some(dossier_widgets::TOGGLE_TEST_ID))
        .map(|w| w.bounds().center());
    let Some(position) = toggle else {
        debug!("nothing to expand");
        return;
    };
    for event in [
        Event::MouseDown {
            position,
            button: MouseButton::Left,
        },
        Event::MouseUp {
            position,
            button: MouseButton::Left,
        },
    ] {
        section.event(&event);
    }
    lay_out(section, width);
}

fn print_summary(description: &Description) {
    let state = description.state();
    println!("has_more: {}", state.has_more);
    println!("expanded: {}", state.expanded);
    println!("content_height: {:.1}", description.content_height());
    println!("visible_height: {:.1}", description.visible_height());
    println!("max_height: {:.1}", description.collapse_height());
    println!("toggle: {}", state.toggle_label().unwrap_or("(none)"));
}
