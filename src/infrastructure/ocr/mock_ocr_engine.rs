use async_trait::async_trait;

use crate::application::ports::{OcrEngine, OcrError};

/// Returns a fixed recognition result regardless of input.
pub struct MockOcrEngine {
    canned_text: String,
}

impl MockOcrEngine {
    pub fn new(canned_text: impl Into<String>) -> Self {
        Self {
            canned_text: canned_text.into(),
        }
    }
}

#[async_trait]
impl OcrEngine for MockOcrEngine {
    async fn recognize(&self, _image_data: &[u8], _media_type: &str) -> Result<String, OcrError> {
        Ok(self.canned_text.clone())
    }
}
