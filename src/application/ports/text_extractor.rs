use async_trait::async_trait;

use crate::domain::{ExtractionResult, SubmittedDocument};

use super::ocr_engine::OcrError;

/// Produces plain text from an uploaded file using the best available
/// strategy, tagged with the method that succeeded. "No usable text found"
/// is a successful-but-empty result, not an error; the error cases are
/// unrecoverable I/O and OCR failures.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(
        &self,
        data: &[u8],
        document: &SubmittedDocument,
    ) -> Result<ExtractionResult, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("failed to spool upload to temporary storage: {0}")]
    Spool(String),
    #[error("ocr failed: {0}")]
    Ocr(#[from] OcrError),
}
