use async_trait::async_trait;

/// Black-box text-from-image recognition. The engine behind this port is an
/// external collaborator; the pipeline only cares about its text output.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image_data: &[u8], media_type: &str) -> Result<String, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("ocr request failed: {0}")]
    RequestFailed(String),
    #[error("ocr returned an unreadable response: {0}")]
    InvalidResponse(String),
}
