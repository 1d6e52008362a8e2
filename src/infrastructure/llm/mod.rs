mod anthropic_client;
mod mock_llm_gateway;

pub use anthropic_client::AnthropicClient;
pub use mock_llm_gateway::MockLlmGateway;
