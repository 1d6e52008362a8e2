use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmGateway, PaymentVerifier, TextExtractor};
use crate::application::services::{InterpretationError, ValidationError};
use crate::domain::{ConversationTurn, RawArtifact, TurnRole};
use crate::presentation::state::AppState;

use super::error::error_response;
use super::interpret::UsageResponse;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<IncomingTurn>,
    pub system: Option<String>,
    pub image: Option<ImagePayload>,
    #[serde(rename = "documentContext")]
    pub document_context: Option<String>,
}

#[derive(Deserialize)]
pub struct IncomingTurn {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ImagePayload {
    pub base64: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageResponse>,
}

/// Follow-up question over a caller-supplied conversation; the final user
/// turn may carry an attached image.
#[tracing::instrument(skip_all, fields(messages = request.messages.len()))]
pub async fn chat_handler<E, L, P>(
    State(state): State<AppState<E, L, P>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    L: LlmGateway + 'static,
    P: PaymentVerifier + 'static,
{
    let turns = match parse_turns(&request.messages) {
        Ok(turns) => turns,
        Err(validation) => {
            tracing::warn!(error = %validation, "Invalid chat request");
            return error_response(&InterpretationError::Validation(validation)).into_response();
        }
    };

    let image = match request.image.map(|i| decode_image(&i)).transpose() {
        Ok(image) => image,
        Err(validation) => {
            tracing::warn!(error = %validation, "Invalid chat image");
            return error_response(&InterpretationError::Validation(validation)).into_response();
        }
    };

    match state
        .interpretation_service
        .follow_up(turns, request.system, image, request.document_context)
        .await
    {
        Ok(result) => {
            tracing::info!("Chat follow-up successful");
            (
                StatusCode::OK,
                Json(ChatResponse {
                    response: result.text,
                    usage: result.usage.map(UsageResponse::from),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat follow-up failed");
            error_response(&e).into_response()
        }
    }
}

fn parse_turns(messages: &[IncomingTurn]) -> Result<Vec<ConversationTurn>, ValidationError> {
    if messages.is_empty() {
        return Err(ValidationError::EmptyConversation);
    }

    messages
        .iter()
        .map(|m| {
            let role = TurnRole::from_request_str(&m.role)
                .ok_or_else(|| ValidationError::UnknownRole(m.role.clone()))?;
            Ok(ConversationTurn {
                role,
                content: m.content.clone(),
            })
        })
        .collect()
}

pub(super) fn decode_image(image: &ImagePayload) -> Result<RawArtifact, ValidationError> {
    let bytes = general_purpose::STANDARD
        .decode(image.base64.trim())
        .map_err(|_| ValidationError::InvalidImage)?;

    if bytes.is_empty() {
        return Err(ValidationError::InvalidImage);
    }

    Ok(RawArtifact::new(image.mime_type.clone(), bytes))
}
