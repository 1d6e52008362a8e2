use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{OcrEngine, OcrError};

/// Adapter for a remote OCR service: one base64 submit, text back. The
/// `languages` hint is passed through untouched (bilingual `ron+eng` for
/// this deployment).
pub struct RemoteOcrAdapter {
    client: Client,
    endpoint: String,
    languages: String,
}

impl RemoteOcrAdapter {
    pub fn new(endpoint: &str, languages: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            languages: languages.to_string(),
        }
    }
}

#[async_trait]
impl OcrEngine for RemoteOcrAdapter {
    #[tracing::instrument(skip_all, fields(media_type = %media_type, bytes = image_data.len()))]
    async fn recognize(&self, image_data: &[u8], media_type: &str) -> Result<String, OcrError> {
        let body = serde_json::json!({
            "image_base64": general_purpose::STANDARD.encode(image_data),
            "media_type": media_type,
            "languages": self.languages,
        });

        let url = format!("{}/recognize", self.endpoint);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| OcrError::RequestFailed(format!("ocr submit failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(OcrError::RequestFailed(format!(
                "ocr service returned {status}: {text}"
            )));
        }

        let recognized: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(e.to_string()))?;

        Ok(recognized.text)
    }
}

#[derive(Deserialize)]
struct RecognizeResponse {
    text: String,
}
