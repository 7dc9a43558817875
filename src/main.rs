//! chart-reader - Describe a bar chart from detector output
//!
//! Reads a chart image and a JSON detections file, extracts the series and
//! prints one sentence per bar (or the full result as JSON).

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chart_reader::capture::load_frame;
use chart_reader::config::{self, AppConfig, OutputFormat};
use chart_reader::shared::{FrameSnapshot, WorkerEvent};
use chart_reader::storage;
use chart_reader::vision::{DetectionSet, TranscriptRecognizer};
use chart_reader::ChartReaderApp;

/// chart-reader - Bar chart description from detections
#[derive(Parser, Debug)]
#[command(name = "chart-reader")]
#[command(about = "Turns bar chart detections and label text into spoken-style sentences")]
struct Args {
    /// Chart image the detections were produced from
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// JSON detections file ({"detections": [{"class", "box", "text"}]})
    #[arg(short, long)]
    detections: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Write the default configuration to the user config directory and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.init_config {
        let path = storage::get_config_dir()?.join(storage::CONFIG_FILE_NAME);
        config::save_config(&AppConfig::default(), &path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let mut config = load_or_default_config(args.config.as_deref())?;
    if let Some(format) = args.format {
        config.output.format = format;
    }

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let (Some(image_path), Some(detections_path)) = (args.image, args.detections) else {
        anyhow::bail!("both --image and --detections are required");
    };

    let frame = load_frame(&image_path)?;
    let set = load_detections(&detections_path)?;
    info!("Loaded {} detections from {:?}", set.detections.len(), detections_path);

    let recognizer = Arc::new(TranscriptRecognizer::from_detections(&set.detections));
    let format = config.output.format;
    let mut app = ChartReaderApp::start(config, recognizer)?;
    app.publisher().publish(FrameSnapshot::new(set.detections, frame));

    match app.describe_latest()? {
        WorkerEvent::Described { result, text } => match format {
            OutputFormat::Text => print!("{}", text),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        },
        WorkerEvent::ExtractionFailed(e) => anyhow::bail!("Extraction failed: {}", e),
        WorkerEvent::NoSnapshot => anyhow::bail!("Extraction failed: no snapshot available"),
    }

    Ok(())
}

/// Load configuration from an explicit path, the user config file, or defaults
fn load_or_default_config(path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = path {
        let config = config::load_config(path)?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_path) = storage::default_config_path() {
        if config_path.exists() {
            let config = config::load_config(&config_path)?;
            info!("Loaded configuration from {:?}", config_path);
            return Ok(config);
        }
    }

    info!("Using default configuration");
    Ok(AppConfig::default())
}

/// Read a JSON detections file
fn load_detections(path: &Path) -> Result<DetectionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read detections file: {:?}", path))?;
    let set: DetectionSet = serde_json::from_str(&content)
        .with_context(|| format!("Invalid detections file: {:?}", path))?;
    Ok(set)
}
