use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use peinteles::application::ports::OcrEngine;
use peinteles::application::services::InterpretationService;
use peinteles::infrastructure::llm::AnthropicClient;
use peinteles::infrastructure::observability::{TracingConfig, init_tracing};
use peinteles::infrastructure::ocr::RemoteOcrAdapter;
use peinteles::infrastructure::payment::AllowAllVerifier;
use peinteles::infrastructure::text_processing::DocumentTextExtractor;
use peinteles::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let ocr: Arc<dyn OcrEngine> = Arc::new(RemoteOcrAdapter::new(
        &settings.ocr.endpoint,
        &settings.ocr.languages,
        Duration::from_secs(settings.ocr.request_timeout_seconds),
    ));

    let gateway = Arc::new(AnthropicClient::new(
        &settings.llm.base_url,
        &settings.llm.api_key,
        &settings.llm.model,
        Duration::from_secs(settings.llm.request_timeout_seconds),
    ));

    let extractor = Arc::new(DocumentTextExtractor::new(ocr));

    let interpretation_service = Arc::new(InterpretationService::new(extractor, gateway));

    let state = AppState {
        interpretation_service,
        payment_verifier: Arc::new(AllowAllVerifier),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
