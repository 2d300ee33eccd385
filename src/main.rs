//! Photo editor command line
//!
//! Opens an image, applies edits through the editing engine and writes the
//! results:
//! - The edited image as PNG
//! - A display preview scaled to a viewport height
//! - The JPEG data URI used for editing advice requests

use anyhow::Context;
use clap::Parser;
use photo_edit_engine::config::{Config, DEFAULT_CONFIG_PATH};
use photo_edit_engine::{EditParameters, Editor};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "photo-edit")]
#[command(about = "Apply exposure, contrast, white balance and grayscale edits to an image")]
#[command(version)]
struct Args {
    /// Image to edit (JPEG or PNG)
    input: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// JSON file with edit parameters; flags below override its values
    #[arg(long)]
    edits: Option<PathBuf>,

    /// Brightness multiplier
    #[arg(long, allow_hyphen_values = true)]
    exposure: Option<f32>,

    /// Offset added to every channel
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<i32>,

    /// Warm (+) / cool (-) shift
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<i32>,

    /// Green (+) / magenta (-) shift
    #[arg(long, allow_hyphen_values = true)]
    tint: Option<i32>,

    /// Edit in black and white
    #[arg(long)]
    grayscale: bool,

    /// Mirror the image left to right
    #[arg(long)]
    flip_h: bool,

    /// Mirror the image top to bottom
    #[arg(long)]
    flip_v: bool,

    /// Write the edited image as PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a display preview as PNG
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Viewport height for the preview (0 uses the configured default)
    #[arg(long, default_value_t = 0)]
    viewport_height: u32,

    /// Print the JPEG data URI sent with editing advice requests
    #[arg(long)]
    data_uri: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose);

    tracing::info!("Starting photo editor");

    let config = Config::load_or_default(&args.config);

    let mut params: EditParameters = match &args.edits {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read edits from {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse edits in {}", path.display()))?
        }
        None => EditParameters::default(),
    };
    apply_overrides(&mut params, &args);

    let mut editor = Editor::new(&config);
    editor
        .open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    if args.flip_h {
        editor.flip_horizontal()?;
    }
    if args.flip_v {
        editor.flip_vertical()?;
    }

    if !params.is_identity() {
        editor.set_params(params)?;
    }

    if let Some(path) = &args.output {
        editor
            .save(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        tracing::info!("Edited image written to {}", path.display());
    }

    if let Some(path) = &args.preview {
        editor.resize_viewport(args.viewport_height);
        let preview = editor.preview().context("No preview rendered")?;
        preview
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
        tracing::info!(
            "Preview {}x{} written to {}",
            preview.width(),
            preview.height(),
            path.display()
        );
    }

    if args.data_uri {
        println!("{}", editor.advice_payload()?);
    }

    Ok(())
}

/// Apply command line parameter flags on top of the loaded edits
fn apply_overrides(params: &mut EditParameters, args: &Args) {
    if let Some(exposure) = args.exposure {
        params.exposure = exposure;
    }
    if let Some(contrast) = args.contrast {
        params.contrast = contrast;
    }
    if let Some(temperature) = args.temperature {
        params.temperature = temperature;
    }
    if let Some(tint) = args.tint {
        params.tint = tint;
    }
    if args.grayscale {
        params.grayscale = true;
    }
}

/// Initialize tracing/logging
///
/// Default level is "warn" so normal runs only print results.
/// Use --verbose flag for "debug" level.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("photo_edit_engine={},photo_edit={}", level, level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
