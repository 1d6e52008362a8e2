/// A fully assembled model call: system instruction, token budget and the
/// ordered messages. Built fresh per request, discarded after the call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub system_instruction: String,
    pub max_output_tokens: u32,
    pub messages: Vec<GatewayMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayMessage {
    pub role: GatewayRole,
    pub content: MessageContent,
}

impl GatewayMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: GatewayRole::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_with_attachment(text: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            role: GatewayRole::User,
            content: MessageContent::TextWithAttachment {
                text: text.into(),
                attachment,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayRole {
    User,
    Assistant,
}

impl GatewayRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    TextWithAttachment {
        text: String,
        attachment: Attachment,
    },
}

/// Base64-encoded binary carried inside a multimodal message.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub media_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub generated_text: String,
    pub usage: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageMetadata {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
