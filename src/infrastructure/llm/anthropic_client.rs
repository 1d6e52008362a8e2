use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{LlmGateway, LlmGatewayError};
use crate::domain::{GatewayMessage, LlmRequest, LlmResponse, MessageContent, UsageMetadata};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Messages-API client for the Anthropic provider. Text goes out as plain
/// content blocks; attachments become base64 `image` or `document` source
/// blocks depending on their media type.
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn message_json(message: &GatewayMessage) -> serde_json::Value {
        let content = match &message.content {
            MessageContent::Text(text) => serde_json::json!([
                { "type": "text", "text": text }
            ]),
            MessageContent::TextWithAttachment { text, attachment } => {
                let block_type = if attachment.media_type == PDF_MEDIA_TYPE {
                    "document"
                } else {
                    "image"
                };
                serde_json::json!([
                    {
                        "type": block_type,
                        "source": {
                            "type": "base64",
                            "media_type": attachment.media_type,
                            "data": attachment.data_base64,
                        }
                    },
                    { "type": "text", "text": text }
                ])
            }
        };

        serde_json::json!({
            "role": message.role.as_str(),
            "content": content,
        })
    }
}

#[async_trait]
impl LlmGateway for AnthropicClient {
    #[tracing::instrument(
        skip(self, request),
        fields(messages = request.messages.len(), max_tokens = request.max_output_tokens)
    )]
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmGatewayError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_output_tokens,
            "system": request.system_instruction,
            "messages": request.messages.iter().map(Self::message_json).collect::<Vec<_>>(),
        });

        let url = format!("{}/v1/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmGatewayError::ApiRequestFailed(format!("request failed: {e}")))?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(LlmGatewayError::AuthFailed);
        }
        if status.as_u16() == 429 {
            return Err(LlmGatewayError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmGatewayError::ApiRequestFailed(format!(
                "provider returned {status}: {text}"
            )));
        }

        let completion: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmGatewayError::InvalidResponse(e.to_string()))?;

        let generated_text = completion
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if generated_text.is_empty() {
            return Err(LlmGatewayError::InvalidResponse(
                "no text content in provider response".to_string(),
            ));
        }

        let usage = completion.usage.map(|u| UsageMetadata {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        });

        Ok(LlmResponse {
            generated_text,
            usage,
        })
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}
