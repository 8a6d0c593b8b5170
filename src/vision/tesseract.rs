//! Tesseract OCR backend
//!
//! Thin wrapper over leptess. The normalized buffer is re-encoded as PNG
//! and handed to tesseract in one shot; whatever text comes back is the
//! result.

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use leptess::LepTess;
use tracing::debug;

use crate::config::OcrSettings;
use crate::imaging::NormalizedImage;
use crate::vision::TextExtractor;

/// Tesseract-backed text extractor.
pub struct TesseractExtractor {
    datapath: Option<String>,
    language: String,
}

impl TesseractExtractor {
    /// Resolve tessdata and verify tesseract initializes, so a broken
    /// install fails at startup rather than mid-interaction.
    pub fn new(settings: &OcrSettings) -> Result<Self> {
        let datapath = match &settings.tessdata_dir {
            Some(dir) => Some(dir.display().to_string()),
            None => find_tessdata_dir(&settings.language)?
                .map(|p| p.display().to_string()),
        };

        LepTess::new(datapath.as_deref(), &settings.language)
            .map_err(|e| anyhow!("tesseract initialization failed: {e}"))?;

        Ok(Self {
            datapath,
            language: settings.language.clone(),
        })
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract_text(&self, image: &NormalizedImage) -> Result<String> {
        let rgb = image.to_rgb();
        let mut encoded = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Png)
            .context("encoding label image for OCR")?;

        let mut tess = LepTess::new(self.datapath.as_deref(), &self.language)
            .map_err(|e| anyhow!("tesseract initialization failed: {e}"))?;
        tess.set_image_from_mem(&encoded)
            .map_err(|e| anyhow!("loading label image into tesseract failed: {e}"))?;

        let text = tess
            .get_utf8_text()
            .context("reading recognized text")?;
        debug!(chars = text.len(), "tesseract recognition complete");
        Ok(text)
    }
}

/// Locate a tessdata directory carrying `<language>.traineddata`.
///
/// Checks `TESSDATA_PREFIX`, then common system locations. `Ok(None)`
/// means "let tesseract use its compiled-in default path".
fn find_tessdata_dir(language: &str) -> Result<Option<PathBuf>> {
    let traineddata = format!("{language}.traineddata");

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let dir = PathBuf::from(&prefix);
        if dir.join(&traineddata).exists() {
            return Ok(Some(dir));
        }
        bail!(
            "TESSDATA_PREFIX is set to {prefix} but {traineddata} is not there"
        );
    }

    let candidates = [
        "/usr/share/tesseract-ocr/5/tessdata",
        "/usr/share/tesseract-ocr/4.00/tessdata",
        "/usr/share/tessdata",
        "/usr/local/share/tessdata",
        "/opt/homebrew/share/tessdata",
    ];
    for candidate in &candidates {
        let dir = PathBuf::from(candidate);
        if dir.join(&traineddata).exists() {
            return Ok(Some(dir));
        }
    }

    Ok(None)
}
