//! Risk analysis pipeline
//!
//! One pass per user interaction: normalize the image, extract text, match
//! the text against the reference tables, then enrich each match with a
//! short definition. The input is immutable for the whole pass; session
//! state stays with the presentation layer.

mod matcher;

pub use matcher::{match_risks, RiskMatch};

use anyhow::Result;
use image::DynamicImage;
use tracing::{debug, info};

use crate::enrich::DefinitionSource;
use crate::imaging;
use crate::reference::ReferenceData;
use crate::vision::TextExtractor;

/// Everything one analysis pass reads: the acquired image and the
/// conditions the user selected, in selection order.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub image: DynamicImage,
    pub conditions: Vec<String>,
}

/// One flagged term with its enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Matched term, lower-cased.
    pub term: String,
    /// Why it was flagged.
    pub reason: String,
    /// Short external definition, or the not-found sentinel.
    pub definition: String,
}

impl Finding {
    /// Term with its first letter capitalized, for display.
    pub fn display_term(&self) -> String {
        let mut chars = self.term.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// Result of one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Raw OCR output for the image.
    pub extracted_text: String,
    /// Flagged terms in match order: global table first, then per-condition.
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    /// True when nothing was flagged. Note this is also what a failed or
    /// empty text extraction produces; "safe" only means "no reference term
    /// was found in the extracted text".
    pub fn is_safe(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Run one full analysis pass.
///
/// Blocking: OCR and each per-term definition lookup run to completion on
/// the caller's thread. A transport failure during enrichment aborts the
/// whole pass.
pub fn run_pass(
    input: &AnalysisInput,
    reference: &ReferenceData,
    extractor: &dyn TextExtractor,
    definitions: &dyn DefinitionSource,
) -> Result<AnalysisReport> {
    let normalized = imaging::normalize(&input.image);
    info!(
        width = normalized.width,
        height = normalized.height,
        "extracting text from label image"
    );
    let extracted_text = extractor.extract_text(&normalized)?;
    debug!(chars = extracted_text.len(), "OCR produced text");

    let matches = match_risks(&extracted_text, &input.conditions, reference);
    info!(matches = matches.len(), "risk matching complete");

    let mut findings = Vec::with_capacity(matches.len());
    for m in matches {
        let definition = definitions.define(&m.term)?;
        findings.push(Finding {
            term: m.term,
            reason: m.reason,
            definition,
        });
    }

    Ok(AnalysisReport {
        extracted_text,
        findings,
    })
}
