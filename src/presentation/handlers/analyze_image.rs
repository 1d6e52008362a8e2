use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::ports::{LlmGateway, PaymentVerifier, TextExtractor};
use crate::application::services::{InterpretationError, ValidationError};
use crate::domain::AnalysisTier;
use crate::presentation::state::AppState;

use super::chat::{ImagePayload, decode_image};
use super::error::error_response;
use super::interpret::interpretation_response;

#[derive(Deserialize)]
pub struct AnalyzeImageRequest {
    pub image: ImagePayload,
    #[serde(rename = "type")]
    pub analysis_type: String,
}

/// Direct multimodal analysis of an attached image, bypassing extraction.
#[tracing::instrument(skip_all, fields(analysis_type = %request.analysis_type))]
pub async fn analyze_image_handler<E, L, P>(
    State(state): State<AppState<E, L, P>>,
    Json(request): Json<AnalyzeImageRequest>,
) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    L: LlmGateway + 'static,
    P: PaymentVerifier + 'static,
{
    let tier = match AnalysisTier::from_request_str(&request.analysis_type) {
        Some(tier) => tier,
        None => {
            tracing::warn!(analysis_type = %request.analysis_type, "Unknown analysis type");
            return error_response(&InterpretationError::Validation(
                ValidationError::UnknownAnalysisType(request.analysis_type),
            ))
            .into_response();
        }
    };

    let artifact = match decode_image(&request.image) {
        Ok(artifact) => artifact,
        Err(validation) => {
            tracing::warn!(error = %validation, "Invalid image payload");
            return error_response(&InterpretationError::Validation(validation)).into_response();
        }
    };

    match state
        .interpretation_service
        .analyze_artifact(artifact, tier)
        .await
    {
        Ok(result) => {
            tracing::info!(tier = tier.as_str(), "Direct image analysis successful");
            interpretation_response(result)
        }
        Err(e) => {
            tracing::error!(error = %e, "Direct image analysis failed");
            error_response(&e).into_response()
        }
    }
}
