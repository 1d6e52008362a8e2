use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, OcrEngine, TextExtractor};
use crate::domain::{ContentType, ExtractionMethod, ExtractionResult, SubmittedDocument};

use super::text_sanitizer::sanitize_extracted_text;

const PDF_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// A native text layer shorter than this is treated as scanned: page numbers
/// and stray labels alone can reach a few dozen characters.
const PDF_NATIVE_MIN_CHARS: usize = 100;

/// Strategy-selecting extractor: native PDF text layer with a scanned
/// fallback tag, OCR for images, verbatim read for plain text. Owns the
/// temporary on-disk spool of the upload and deletes it on every exit path.
pub struct DocumentTextExtractor {
    ocr: Arc<dyn OcrEngine>,
}

impl DocumentTextExtractor {
    pub fn new(ocr: Arc<dyn OcrEngine>) -> Self {
        Self { ocr }
    }

    async fn extract_pdf(&self, data: &[u8]) -> Result<ExtractionResult, ExtractionError> {
        let mut spool = tempfile::NamedTempFile::new()
            .map_err(|e| ExtractionError::Spool(format!("failed to create temp file: {e}")))?;

        spool
            .write_all(data)
            .and_then(|_| spool.flush())
            .map_err(|e| ExtractionError::Spool(format!("failed to write temp file: {e}")))?;

        let path = spool.path().to_path_buf();

        let outcome = tokio::time::timeout(
            PDF_EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                std::panic::catch_unwind(|| pdf_extract::extract_text(&path))
                    .map_err(|_| "panic during PDF parsing".to_string())
                    .and_then(|parsed| parsed.map_err(|e| e.to_string()))
            }),
        )
        .await;

        // The spool file lives until this function returns, so the parse
        // task above always sees it; dropping `spool` removes it.

        let text = match outcome {
            Ok(Ok(Ok(text))) => text,
            Ok(Ok(Err(reason))) => {
                tracing::warn!(reason = %reason, "Native PDF parsing failed, tagging as scanned");
                return Ok(ExtractionResult::empty(ExtractionMethod::PdfScannedFallback));
            }
            Ok(Err(join_error)) => {
                tracing::warn!(error = %join_error, "PDF parsing task died, tagging as scanned");
                return Ok(ExtractionResult::empty(ExtractionMethod::PdfScannedFallback));
            }
            Err(_) => {
                tracing::warn!("Native PDF parsing timed out, tagging as scanned");
                return Ok(ExtractionResult::empty(ExtractionMethod::PdfScannedFallback));
            }
        };

        let sanitized = sanitize_extracted_text(&text);

        if sanitized.chars().count() > PDF_NATIVE_MIN_CHARS {
            Ok(ExtractionResult::new(
                sanitized,
                ExtractionMethod::PdfNativeText,
            ))
        } else {
            tracing::info!(
                chars = sanitized.chars().count(),
                "Native text layer too short, tagging as scanned"
            );
            Ok(ExtractionResult::empty(ExtractionMethod::PdfScannedFallback))
        }
    }
}

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.original_filename,
            media_type = %document.declared_mime,
        )
    )]
    async fn extract(
        &self,
        data: &[u8],
        document: &SubmittedDocument,
    ) -> Result<ExtractionResult, ExtractionError> {
        match document.content_type {
            ContentType::Pdf => self.extract_pdf(data).await,
            ContentType::Image => {
                let raw = self.ocr.recognize(data, &document.declared_mime).await?;
                let sanitized = sanitize_extracted_text(&raw);
                tracing::info!(chars = sanitized.chars().count(), "OCR complete");
                Ok(ExtractionResult::new(sanitized, ExtractionMethod::ImageOcr))
            }
            ContentType::Text => Ok(ExtractionResult::new(
                String::from_utf8_lossy(data).into_owned(),
                ExtractionMethod::PlainTextRead,
            )),
        }
    }
}
