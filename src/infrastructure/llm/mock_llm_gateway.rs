use async_trait::async_trait;

use crate::application::ports::{LlmGateway, LlmGatewayError};
use crate::domain::{LlmRequest, LlmResponse};

/// Canned-response gateway for tests and local scaffolding.
pub struct MockLlmGateway;

#[async_trait]
impl LlmGateway for MockLlmGateway {
    async fn generate(&self, _request: &LlmRequest) -> Result<LlmResponse, LlmGatewayError> {
        Ok(LlmResponse {
            generated_text: "Explicație de test.".to_string(),
            usage: None,
        })
    }
}
