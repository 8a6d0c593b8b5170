//! Text extraction layer
//!
//! The OCR engine is a collaborator behind the `TextExtractor` trait: a
//! normalized pixel buffer goes in, recognized text comes out. No retry,
//! no confidence thresholding, no multi-pass recognition. Empty or garbled
//! output is not an error here; it flows downstream as a low-signal match
//! set.

#[cfg(feature = "ocr-tesseract")]
mod tesseract;

#[cfg(feature = "ocr-tesseract")]
pub use tesseract::TesseractExtractor;

use anyhow::Result;

use crate::config::OcrSettings;
use crate::imaging::NormalizedImage;

/// OCR backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackend {
    /// Tesseract via leptess (requires the `ocr-tesseract` feature)
    #[default]
    Tesseract,
    /// Fixed text, for tests and builds without an OCR backend
    Fixture,
}

/// Recognizes text in a normalized label image.
pub trait TextExtractor {
    /// Extract all recognized text as a single string.
    fn extract_text(&self, image: &NormalizedImage) -> Result<String>;
}

/// Extractor that returns preset text regardless of the image.
pub struct FixtureExtractor {
    text: String,
}

impl FixtureExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextExtractor for FixtureExtractor {
    fn extract_text(&self, _image: &NormalizedImage) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Build the configured text extractor.
///
/// When the binary was built without the `ocr-tesseract` feature, a
/// tesseract selection falls back to the fixture extractor with a warning
/// rather than failing startup.
pub fn build_extractor(settings: &OcrSettings) -> Result<Box<dyn TextExtractor>> {
    match settings.backend {
        OcrBackend::Tesseract => {
            #[cfg(feature = "ocr-tesseract")]
            {
                let extractor = TesseractExtractor::new(settings)?;
                tracing::info!(language = %settings.language, "tesseract OCR initialized");
                Ok(Box::new(extractor))
            }
            #[cfg(not(feature = "ocr-tesseract"))]
            {
                tracing::warn!(
                    "built without the ocr-tesseract feature; using fixture text"
                );
                Ok(Box::new(FixtureExtractor::new(settings.fixture_text.clone())))
            }
        }
        OcrBackend::Fixture => Ok(Box::new(FixtureExtractor::new(
            settings.fixture_text.clone(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_image() -> NormalizedImage {
        NormalizedImage {
            data: vec![0; 3],
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_fixture_extractor_returns_preset_text() {
        let extractor = FixtureExtractor::new("Ingredients: water, sugar");
        let text = extractor.extract_text(&blank_image()).unwrap();
        assert_eq!(text, "Ingredients: water, sugar");
    }

    #[test]
    fn test_build_fixture_backend() {
        let settings = OcrSettings {
            backend: OcrBackend::Fixture,
            fixture_text: "salt".to_string(),
            ..Default::default()
        };
        let extractor = build_extractor(&settings).unwrap();
        assert_eq!(extractor.extract_text(&blank_image()).unwrap(), "salt");
    }

    #[test]
    fn test_backend_serde_names() {
        assert_eq!(
            serde_json::to_string(&OcrBackend::Tesseract).unwrap(),
            "\"tesseract\""
        );
        let parsed: OcrBackend = serde_json::from_str("\"fixture\"").unwrap();
        assert_eq!(parsed, OcrBackend::Fixture);
    }
}
