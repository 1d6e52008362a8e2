use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{LlmGateway, PaymentVerifier, TextExtractor};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_image_handler, chat_handler, health_handler, interpret_full_handler,
    interpret_handler, root_handler,
};
use crate::presentation::state::AppState;

/// Slack on top of the upload limit for multipart framing and the other form
/// fields.
const BODY_LIMIT_SLACK_BYTES: u64 = 64 * 1024;

pub fn create_router<E, L, P>(state: AppState<E, L, P>) -> Router
where
    E: TextExtractor + 'static,
    L: LlmGateway + 'static,
    P: PaymentVerifier + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit =
        (state.settings.limits.max_upload_bytes() + BODY_LIMIT_SLACK_BYTES) as usize;

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/interpret", post(interpret_handler::<E, L, P>))
        .route("/api/interpret-full", post(interpret_full_handler::<E, L, P>))
        .route("/api/claude", post(chat_handler::<E, L, P>))
        .route("/api/analyze-image", post(analyze_image_handler::<E, L, P>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
