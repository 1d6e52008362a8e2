use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::application::ports::LlmGatewayError;
use crate::application::services::{InterpretationError, ValidationError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

/// Sole translator from pipeline errors to HTTP status + user-facing message.
/// User messages are Romanian; internal detail stays in the logs. Exhaustive
/// on purpose: a new error variant must pick its status here or the build
/// breaks.
pub fn error_response(err: &InterpretationError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = match err {
        InterpretationError::Validation(validation) => match validation {
            ValidationError::EmptySubmission => (
                StatusCode::BAD_REQUEST,
                "Nu ați trimis niciun document sau text de analizat.",
            ),
            ValidationError::InsufficientText => (
                StatusCode::BAD_REQUEST,
                "Conținutul trimis este prea scurt pentru a fi analizat.",
            ),
            ValidationError::UnsupportedMediaType(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Tipul de fișier nu este acceptat. Trimiteți un PDF, o imagine sau un text.",
            ),
            ValidationError::FileTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Fișierul depășește limita de 20MB.",
            ),
            ValidationError::EmptyConversation => (
                StatusCode::BAD_REQUEST,
                "Lipsește lista de mesaje a conversației.",
            ),
            ValidationError::InvalidImage => (
                StatusCode::BAD_REQUEST,
                "Imaginea trimisă nu a putut fi decodificată.",
            ),
            ValidationError::UnknownAnalysisType(_) => (
                StatusCode::BAD_REQUEST,
                "Tipul de analiză trebuie să fie \"preview\" sau \"full\".",
            ),
            ValidationError::UnknownRole(_) => (
                StatusCode::BAD_REQUEST,
                "Rolul fiecărui mesaj trebuie să fie \"user\" sau \"assistant\".",
            ),
        },
        InterpretationError::Extraction(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Nu am putut citi documentul. Vă rugăm să încercați din nou.",
        ),
        InterpretationError::Assembly(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "A apărut o eroare internă. Vă rugăm să încercați din nou.",
        ),
        // Never leak credential detail to the caller.
        InterpretationError::Gateway(LlmGatewayError::AuthFailed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Serviciul de analiză este momentan indisponibil.",
        ),
        InterpretationError::Gateway(LlmGatewayError::RateLimited) => (
            StatusCode::TOO_MANY_REQUESTS,
            "Prea multe cereri. Încercați din nou în câteva momente.",
        ),
        InterpretationError::Gateway(
            LlmGatewayError::ApiRequestFailed(_) | LlmGatewayError::InvalidResponse(_),
        ) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "A apărut o eroare la analiza documentului. Vă rugăm să încercați din nou.",
        ),
        InterpretationError::PaymentRequired => (
            StatusCode::PAYMENT_REQUIRED,
            "Analiza completă necesită achitarea serviciului.",
        ),
    };

    (status, Json(ErrorResponse::new(message)))
}
