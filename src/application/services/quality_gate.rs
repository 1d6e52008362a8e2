use crate::domain::{ExtractionMethod, ExtractionResult, RoutingDecision};

use super::validation::ValidationError;

/// Minimum trimmed length for text that did not come out of OCR.
const MIN_TEXT_CHARS: usize = 20;
/// OCR output is held to stricter minimums to guard against sparse noise.
const MIN_OCR_CHARS: usize = 50;
const MIN_OCR_WORDS: usize = 10;

/// Decides whether extracted text is trustworthy enough to send to the model,
/// or whether the original artifact should be submitted multimodally instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct QualityGate;

impl QualityGate {
    pub fn new() -> Self {
        Self
    }

    /// `has_raw_artifact` is true when the original image or PDF bytes are
    /// still available as a fallback target. Plain-text and inline
    /// submissions have nothing to fall back to: unusable text there is a
    /// caller error, not a routing case.
    pub fn decide(
        &self,
        extraction: &ExtractionResult,
        has_raw_artifact: bool,
    ) -> Result<RoutingDecision, ValidationError> {
        // A scanned or unparseable PDF never routes through its (empty)
        // text, regardless of the length thresholds.
        if extraction.method == ExtractionMethod::PdfScannedFallback {
            return if has_raw_artifact {
                Ok(RoutingDecision::UseMultimodalFallback)
            } else {
                Err(ValidationError::InsufficientText)
            };
        }

        let trimmed = extraction.text.trim();

        if self.is_usable(trimmed, extraction.method) {
            return Ok(RoutingDecision::UseExtractedText(trimmed.to_string()));
        }

        if has_raw_artifact {
            tracing::debug!(
                method = extraction.method.as_str(),
                chars = trimmed.chars().count(),
                "Extracted text below quality thresholds, routing multimodally"
            );
            Ok(RoutingDecision::UseMultimodalFallback)
        } else {
            Err(ValidationError::InsufficientText)
        }
    }

    fn is_usable(&self, trimmed: &str, method: ExtractionMethod) -> bool {
        let chars = trimmed.chars().count();

        match method {
            ExtractionMethod::ImageOcr => {
                chars >= MIN_OCR_CHARS && trimmed.split_whitespace().count() >= MIN_OCR_WORDS
            }
            _ => chars >= MIN_TEXT_CHARS,
        }
    }
}
