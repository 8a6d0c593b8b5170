//! Ingredient Inspector - packaged-food label safety analyser
//!
//! Photograph or upload a picture of an ingredient label, extract the
//! printed text with OCR, and flag ingredients that are harmful in general
//! or risky for the user's selected health conditions, each annotated with
//! a short encyclopedia definition.

mod analysis;
mod app;
#[cfg(feature = "camera")]
mod capture;
mod config;
mod enrich;
mod imaging;
mod reference;
mod vision;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::analysis::AnalysisInput;
use crate::app::InspectorApp;
use crate::config::AppConfig;
use crate::enrich::WikipediaClient;
use crate::reference::ReferenceData;

/// Ingredient Inspector - label safety analysis
#[derive(Parser, Debug)]
#[command(name = "ingredient-inspector")]
#[command(about = "Check product ingredient labels for safety and health risks")]
struct Args {
    /// Path to the configuration file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the harmful-ingredient reference table path
    #[arg(long)]
    reference: Option<PathBuf>,

    /// Analyse a single image file and print the report instead of
    /// opening the GUI
    #[arg(long)]
    image: Option<PathBuf>,

    /// Comma-separated health conditions for --image mode
    #[arg(long, value_delimiter = ',')]
    conditions: Vec<String>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = load_or_create_config(args.config.as_deref());
    if let Some(reference_path) = args.reference {
        config.reference.harmful_table = reference_path;
    }

    // The reference table is required; startup fails without it.
    let reference = ReferenceData::load(&config.reference.harmful_table)
        .context("loading harmful-ingredient reference table")?;

    if let Some(image_path) = args.image {
        return run_once(&config, &reference, &image_path, args.conditions);
    }

    info!("Ingredient Inspector starting");
    run_gui(config, reference)
}

/// Load configuration from an explicit path or the platform config dir,
/// falling back to defaults.
fn load_or_create_config(explicit: Option<&std::path::Path>) -> AppConfig {
    if let Some(path) = explicit {
        match config::load_config(path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                return config;
            }
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to load config; using defaults");
                return AppConfig::default();
            }
        }
    }
    if let Ok(config_dir) = config::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

/// Analyse one image file and print the numbered report.
fn run_once(
    config: &AppConfig,
    reference: &ReferenceData,
    image_path: &std::path::Path,
    conditions: Vec<String>,
) -> Result<()> {
    let image = image::open(image_path)
        .with_context(|| format!("opening image {}", image_path.display()))?;
    let extractor = vision::build_extractor(&config.ocr)?;
    let definitions = WikipediaClient::new(&config.lookup)?;

    let input = AnalysisInput { image, conditions };
    let report = analysis::run_pass(&input, reference, extractor.as_ref(), &definitions)?;

    println!("Extracted text:");
    println!("{}", report.extracted_text);
    println!();

    if report.is_safe() {
        println!("No risky ingredients found for the selected conditions.");
    } else {
        println!("Unsafe ingredients detected:");
        for (idx, finding) in report.findings.iter().enumerate() {
            println!("{}. {}: {}", idx + 1, finding.display_term(), finding.reason);
            println!("   {}", finding.definition);
        }
    }
    Ok(())
}

/// Open the interactive window.
fn run_gui(config: AppConfig, reference: ReferenceData) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1000.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Ingredient Inspector",
        options,
        Box::new(|_cc| {
            let app = InspectorApp::new(config, reference)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("GUI failed: {e}"))
}
