use async_trait::async_trait;

use crate::domain::{LlmRequest, LlmResponse};

/// Stateless chat-completion call against the model provider. Authentication
/// failure and rate limiting surface as distinct variants so the boundary can
/// map them to distinct responses.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmGatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmGatewayError {
    #[error("authentication with the model provider failed")]
    AuthFailed,
    #[error("rate limited by the model provider")]
    RateLimited,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
