use base64::{Engine as _, engine::general_purpose};

use crate::domain::{
    AnalysisTier, Attachment, ConversationTurn, GatewayMessage, GatewayRole, LlmRequest,
    MessageContent, RawArtifact, RoutingDecision, TurnRole,
};

use super::prompt_table::PromptTable;

const PLACEHOLDER: &str = "{text}";

const DOCUMENT_CONTEXT_PREFIX: &str = "\n\nContext despre documentul analizat:\n";

/// Builds the final model call from a routing decision and the tier's
/// template. Pure: identical inputs produce identical requests.
pub struct RequestAssembler {
    prompts: &'static PromptTable,
}

#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("multimodal routing decided but no raw artifact available")]
    MissingArtifact,
}

impl RequestAssembler {
    pub fn new(prompts: &'static PromptTable) -> Self {
        Self { prompts }
    }

    pub fn assemble(
        &self,
        tier: AnalysisTier,
        decision: RoutingDecision,
        artifact: Option<RawArtifact>,
    ) -> Result<LlmRequest, AssemblyError> {
        let template = self.prompts.template(tier);

        let message = match decision {
            RoutingDecision::UseExtractedText(text) => GatewayMessage::user_text(
                template.user_instruction_template.replace(PLACEHOLDER, &text),
            ),
            RoutingDecision::UseMultimodalFallback => {
                let artifact = artifact.ok_or(AssemblyError::MissingArtifact)?;
                GatewayMessage::user_with_attachment(
                    template.multimodal_instruction,
                    encode_attachment(&artifact),
                )
            }
        };

        Ok(LlmRequest {
            system_instruction: template.system_instruction.to_string(),
            max_output_tokens: template.max_output_tokens,
            messages: vec![message],
        })
    }

    /// Chat history goes through in original order; only the final user turn
    /// may carry the attached image. A caller-supplied system instruction
    /// replaces the built-in one, and document context is appended verbatim
    /// to whichever is active.
    pub fn assemble_chat(
        &self,
        turns: &[ConversationTurn],
        system_override: Option<&str>,
        image: Option<RawArtifact>,
        document_context: Option<&str>,
    ) -> LlmRequest {
        let template = self.prompts.template(AnalysisTier::ChatFollowup);

        let mut system_instruction = system_override
            .unwrap_or(template.system_instruction)
            .to_string();
        if let Some(context) = document_context {
            system_instruction.push_str(DOCUMENT_CONTEXT_PREFIX);
            system_instruction.push_str(context);
        }

        let last_user_index = turns.iter().rposition(|t| t.role == TurnRole::User);

        let messages = turns
            .iter()
            .enumerate()
            .map(|(index, turn)| {
                let role = match turn.role {
                    TurnRole::User => GatewayRole::User,
                    TurnRole::Assistant => GatewayRole::Assistant,
                };

                let content = if Some(index) == last_user_index {
                    match &image {
                        Some(artifact) => MessageContent::TextWithAttachment {
                            text: turn.content.clone(),
                            attachment: encode_attachment(artifact),
                        },
                        None => MessageContent::Text(turn.content.clone()),
                    }
                } else {
                    MessageContent::Text(turn.content.clone())
                };

                GatewayMessage { role, content }
            })
            .collect();

        LlmRequest {
            system_instruction,
            max_output_tokens: template.max_output_tokens,
            messages,
        }
    }
}

fn encode_attachment(artifact: &RawArtifact) -> Attachment {
    Attachment {
        media_type: artifact.media_type.clone(),
        data_base64: general_purpose::STANDARD.encode(&artifact.bytes),
    }
}
