//! Application Configuration
//!
//! User settings stored in TOML format: where the reference table lives,
//! which OCR backend to use, and how definition lookups are made.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::vision::OcrBackend;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reference table settings
    pub reference: ReferenceSettings,
    /// OCR settings
    pub ocr: OcrSettings,
    /// Definition lookup settings
    pub lookup: LookupSettings,
    /// Camera capture settings
    pub capture: CaptureSettings,
}

/// Where the harmful-ingredient table is read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSettings {
    /// Path to the two-column CSV table (ingredient, effect)
    pub harmful_table: PathBuf,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            harmful_table: PathBuf::from("data/harmful_ingredients.csv"),
        }
    }
}

/// Text extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrSettings {
    /// Which OCR backend to use
    pub backend: OcrBackend,
    /// Recognition language (tesseract traineddata name)
    pub language: String,
    /// Explicit tessdata directory; discovered from the environment when unset
    pub tessdata_dir: Option<PathBuf>,
    /// Text returned by the fixture backend
    pub fixture_text: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: OcrBackend::default(),
            language: "eng".to_string(),
            tessdata_dir: None,
            fixture_text: String::new(),
        }
    }
}

/// Definition lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSettings {
    /// REST endpoint of the encyclopedia service. The default selects the
    /// English Wikipedia.
    pub endpoint: String,
    /// Client identifier sent with every request
    pub user_agent: String,
    /// Maximum summary length in characters
    pub summary_limit: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/api/rest_v1".to_string(),
            user_agent: "IngredientInspector/1.0".to_string(),
            summary_limit: 300,
        }
    }
}

/// Camera capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Camera device index (0 = default camera)
    pub camera_index: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self { camera_index: 0 }
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config =
        toml::from_str(&contents).with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(config).context("serializing config")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("writing config file {}", path.display()))?;
    Ok(())
}

/// Platform configuration directory for this application
pub fn get_config_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "ingredient-inspector")
        .context("resolving platform config directory")?;
    Ok(dirs.config_dir().to_path_buf())
}
