use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{LlmGateway, PaymentVerifier, TextExtractor};
use crate::application::services::{Interpretation, InterpretationError, ValidationError};
use crate::domain::{AnalysisTier, ContentType, SubmittedDocument, Submission, UsageMetadata};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::{ErrorResponse, error_response};

#[derive(Serialize)]
pub struct InterpretResponse {
    pub status: String,
    pub tier: String,
    pub interpretation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_method: Option<String>,
    pub multimodal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageResponse>,
}

#[derive(Serialize)]
pub struct UsageResponse {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl From<UsageMetadata> for UsageResponse {
    fn from(usage: UsageMetadata) -> Self {
        Self {
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
        }
    }
}

pub(super) fn interpretation_response(result: Interpretation) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(InterpretResponse {
            status: "ok".to_string(),
            tier: result.tier.as_str().to_string(),
            interpretation: result.text,
            extraction_method: result.extraction_method.map(|m| m.as_str().to_string()),
            multimodal: result.routed_multimodal,
            usage: result.usage.map(UsageResponse::from),
        }),
    )
        .into_response()
}

/// Preview-tier analysis of an uploaded file or pasted text.
#[tracing::instrument(skip_all)]
pub async fn interpret_handler<E, L, P>(
    State(state): State<AppState<E, L, P>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    L: LlmGateway + 'static,
    P: PaymentVerifier + 'static,
{
    run_interpretation(state, multipart, AnalysisTier::Preview).await
}

/// Full-tier analysis. The payment collaborator is consulted before any
/// extraction work starts.
#[tracing::instrument(skip_all)]
pub async fn interpret_full_handler<E, L, P>(
    State(state): State<AppState<E, L, P>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    L: LlmGateway + 'static,
    P: PaymentVerifier + 'static,
{
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = state.payment_verifier.verify(authorization).await {
        tracing::warn!(error = %e, "Full-tier request refused by payment verifier");
        return error_response(&InterpretationError::PaymentRequired).into_response();
    }

    run_interpretation(state, multipart, AnalysisTier::Full).await
}

async fn run_interpretation<E, L, P>(
    state: AppState<E, L, P>,
    multipart: Multipart,
    tier: AnalysisTier,
) -> axum::response::Response
where
    E: TextExtractor + 'static,
    L: LlmGateway + 'static,
    P: PaymentVerifier + 'static,
{
    let submission = match read_submission(multipart, state.settings.limits.max_upload_bytes())
        .await
    {
        Ok(submission) => submission,
        Err(response) => return response,
    };

    match state
        .interpretation_service
        .interpret(submission, tier)
        .await
    {
        Ok(result) => {
            tracing::info!(tier = tier.as_str(), "Interpretation successful");
            interpretation_response(result)
        }
        Err(e) => {
            tracing::error!(error = %e, tier = tier.as_str(), "Interpretation failed");
            error_response(&e).into_response()
        }
    }
}

/// Reads the multipart form into a [`Submission`], rejecting unaccepted media
/// types and oversized files before any extraction work happens. A `file`
/// field wins over a `text` field when both are present.
async fn read_submission(
    mut multipart: Multipart,
    max_upload_bytes: u64,
) -> Result<Submission, axum::response::Response> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut inline_text: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Cererea nu a putut fi citită.".to_string(),
                    }),
                )
                    .into_response());
            }
        };

        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let declared_mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read file bytes");
                        return Err((
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: "Fișierul nu a putut fi citit.".to_string(),
                            }),
                        )
                            .into_response());
                    }
                };

                tracing::debug!(
                    filename = %filename,
                    media_type = %declared_mime,
                    bytes = data.len(),
                    "File upload received"
                );

                file = Some((filename, declared_mime, data.to_vec()));
            }
            Some("text") => {
                let text = field.text().await.unwrap_or_default();
                tracing::debug!(text = %sanitize_prompt(&text), "Inline text received");
                inline_text = Some(text);
            }
            _ => {}
        }
    }

    if let Some((filename, declared_mime, data)) = file {
        let content_type = match ContentType::from_mime(&declared_mime) {
            Some(ct) => ct,
            None => {
                tracing::warn!(media_type = %declared_mime, "Unsupported media type");
                return Err(validation_rejection(ValidationError::UnsupportedMediaType(
                    declared_mime,
                )));
            }
        };

        let size_bytes = data.len() as u64;
        if size_bytes > max_upload_bytes {
            return Err(validation_rejection(ValidationError::FileTooLarge {
                size_bytes,
                max_bytes: max_upload_bytes,
            }));
        }

        let document = SubmittedDocument::new(filename, content_type, declared_mime, size_bytes);
        return Ok(Submission::File {
            document,
            data,
        });
    }

    match inline_text {
        Some(text) if !text.trim().is_empty() => Ok(Submission::InlineText(text)),
        _ => Err(validation_rejection(ValidationError::EmptySubmission)),
    }
}

fn validation_rejection(validation: ValidationError) -> axum::response::Response {
    error_response(&InterpretationError::Validation(validation)).into_response()
}
