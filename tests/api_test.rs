use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::{Engine as _, engine::general_purpose};
use tower::ServiceExt;

use peinteles::application::ports::{
    LlmGateway, LlmGatewayError, OcrEngine, PaymentError, PaymentVerifier,
};
use peinteles::application::services::InterpretationService;
use peinteles::domain::{LlmRequest, LlmResponse, MessageContent, UsageMetadata};
use peinteles::infrastructure::ocr::MockOcrEngine;
use peinteles::infrastructure::payment::AllowAllVerifier;
use peinteles::infrastructure::text_processing::DocumentTextExtractor;
use peinteles::presentation::config::{
    LimitSettings, LlmSettings, LoggingSettings, OcrSettings, ServerSettings, Settings,
};
use peinteles::presentation::{AppState, create_router};

const BOUNDARY: &str = "x-peinteles-test";
const FINE_NOTICE_TEXT: &str = "Ați primit o amendă de 500 lei.";
const RICH_OCR_TEXT: &str = "Proces verbal de constatare a contravenției, amendă în cuantum de \
500 lei, termen de achitare de 15 zile de la comunicare.";
const SPARSE_OCR_TEXT: &str = "bon total 500 lei";

#[derive(Default)]
struct RecordingGateway {
    requests: Mutex<Vec<LlmRequest>>,
}

impl RecordingGateway {
    fn recorded(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmGateway for RecordingGateway {
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, LlmGatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(LlmResponse {
            generated_text: "Explicație de test.".to_string(),
            usage: Some(UsageMetadata {
                input_tokens: 12,
                output_tokens: 34,
            }),
        })
    }
}

struct RateLimitedGateway;

#[async_trait::async_trait]
impl LlmGateway for RateLimitedGateway {
    async fn generate(&self, _request: &LlmRequest) -> Result<LlmResponse, LlmGatewayError> {
        Err(LlmGatewayError::RateLimited)
    }
}

struct DenyingVerifier;

#[async_trait::async_trait]
impl PaymentVerifier for DenyingVerifier {
    async fn verify(&self, _authorization: Option<&str>) -> Result<(), PaymentError> {
        Err(PaymentError::NotVerified)
    }
}

fn test_settings(max_file_size_mb: u64) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        llm: LlmSettings {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            base_url: "http://localhost:9".to_string(),
            request_timeout_seconds: 5,
        },
        ocr: OcrSettings {
            endpoint: "http://localhost:9".to_string(),
            languages: "ron+eng".to_string(),
            request_timeout_seconds: 5,
        },
        limits: LimitSettings { max_file_size_mb },
        logging: LoggingSettings {
            level: "info".to_string(),
            enable_json: false,
        },
    }
}

fn app(ocr_text: &str, gateway: Arc<RecordingGateway>) -> Router {
    let ocr: Arc<dyn OcrEngine> = Arc::new(MockOcrEngine::new(ocr_text));
    let extractor = Arc::new(DocumentTextExtractor::new(ocr));
    let state = AppState {
        interpretation_service: Arc::new(InterpretationService::new(extractor, gateway)),
        payment_verifier: Arc::new(AllowAllVerifier),
        settings: test_settings(20),
    };
    create_router(state)
}

fn text_form(text: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"text\"\r\n\r\n{text}\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes()
}

fn file_form(filename: &str, mime: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_the_root_route_when_requested_then_the_info_payload_comes_back() {
    let router = app("", Arc::new(RecordingGateway::default()));

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "OK");
}

#[tokio::test]
async fn given_the_health_route_when_requested_then_the_service_reports_healthy() {
    let router = app("", Arc::new(RecordingGateway::default()));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn given_inline_text_when_interpreting_then_the_text_reaches_the_model_verbatim() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            text_form(FINE_NOTICE_TEXT),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["tier"], "preview");
    assert_eq!(json["extraction_method"], "direct_text");
    assert_eq!(json["multimodal"], false);
    assert_eq!(json["interpretation"], "Explicație de test.");

    let recorded = gateway.recorded();
    assert_eq!(recorded.len(), 1);
    match &recorded[0].messages[0].content {
        MessageContent::Text(text) => assert!(text.contains(FINE_NOTICE_TEXT)),
        other => panic!("expected text payload, got {other:?}"),
    }
}

#[tokio::test]
async fn given_no_file_and_no_text_when_interpreting_then_400_and_no_model_call() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    let response = router
        .oneshot(multipart_request("/api/interpret", text_form("")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(gateway.recorded().is_empty());
}

#[tokio::test]
async fn given_a_three_character_text_file_when_interpreting_then_400_and_no_model_call() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            file_form("note.txt", "text/plain", b"da."),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(gateway.recorded().is_empty());
}

#[tokio::test]
async fn given_an_unaccepted_media_type_when_interpreting_then_the_upload_is_rejected() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            file_form("arhiva.zip", "application/zip", b"PK\x03\x04"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(gateway.recorded().is_empty());
}

#[tokio::test]
async fn given_a_file_over_the_size_limit_when_interpreting_then_413_before_extraction() {
    let gateway = Arc::new(RecordingGateway::default());
    let ocr: Arc<dyn OcrEngine> = Arc::new(MockOcrEngine::new(""));
    let extractor = Arc::new(DocumentTextExtractor::new(ocr));
    let state = AppState {
        interpretation_service: Arc::new(InterpretationService::new(
            extractor,
            Arc::clone(&gateway),
        )),
        payment_verifier: Arc::new(AllowAllVerifier),
        // Zero-MB limit: any non-empty upload is over it.
        settings: test_settings(0),
    };
    let router = create_router(state);

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            file_form("mare.pdf", "application/pdf", b"%PDF-1.4 ..."),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(gateway.recorded().is_empty());
}

#[tokio::test]
async fn given_sparse_ocr_output_when_interpreting_an_image_then_the_original_bytes_go_multimodal()
{
    let gateway = Arc::new(RecordingGateway::default());
    let router = app(SPARSE_OCR_TEXT, Arc::clone(&gateway));
    let image_bytes = vec![0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            file_form("poza.png", "image/png", &image_bytes),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["extraction_method"], "image_ocr");
    assert_eq!(json["multimodal"], true);

    let recorded = gateway.recorded();
    assert_eq!(recorded.len(), 1);
    match &recorded[0].messages[0].content {
        MessageContent::TextWithAttachment { attachment, .. } => {
            assert_eq!(attachment.media_type, "image/png");
            assert_eq!(
                attachment.data_base64,
                general_purpose::STANDARD.encode(&image_bytes)
            );
        }
        other => panic!("expected the original image bytes, got {other:?}"),
    }
}

#[tokio::test]
async fn given_rich_ocr_output_when_interpreting_an_image_then_the_extracted_text_is_used() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app(RICH_OCR_TEXT, Arc::clone(&gateway));

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            file_form("poza.jpg", "image/jpeg", &[0xff, 0xd8, 0xff, 0xe0]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["extraction_method"], "image_ocr");
    assert_eq!(json["multimodal"], false);

    let recorded = gateway.recorded();
    match &recorded[0].messages[0].content {
        MessageContent::Text(text) => assert!(text.contains("Proces verbal")),
        other => panic!("expected extracted text, got {other:?}"),
    }
}

#[tokio::test]
async fn given_garbage_pdf_bytes_when_interpreting_then_the_document_goes_multimodal() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));
    let pdf_bytes = b"definitely not a pdf".to_vec();

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            file_form("scanat.pdf", "application/pdf", &pdf_bytes),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["extraction_method"], "pdf_scanned_fallback");
    assert_eq!(json["multimodal"], true);

    let recorded = gateway.recorded();
    match &recorded[0].messages[0].content {
        MessageContent::TextWithAttachment { attachment, .. } => {
            assert_eq!(attachment.media_type, "application/pdf");
        }
        other => panic!("expected a document attachment, got {other:?}"),
    }
}

#[tokio::test]
async fn given_a_denied_payment_when_interpreting_full_then_402_and_no_pipeline_work() {
    let gateway = Arc::new(RecordingGateway::default());
    let ocr: Arc<dyn OcrEngine> = Arc::new(MockOcrEngine::new(""));
    let extractor = Arc::new(DocumentTextExtractor::new(ocr));
    let state = AppState {
        interpretation_service: Arc::new(InterpretationService::new(
            extractor,
            Arc::clone(&gateway),
        )),
        payment_verifier: Arc::new(DenyingVerifier),
        settings: test_settings(20),
    };
    let router = create_router(state);

    let response = router
        .oneshot(multipart_request(
            "/api/interpret-full",
            text_form(FINE_NOTICE_TEXT),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert!(gateway.recorded().is_empty());
}

#[tokio::test]
async fn given_the_full_tier_when_interpreting_then_the_full_budget_applies() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    let response = router
        .oneshot(multipart_request(
            "/api/interpret-full",
            text_form(FINE_NOTICE_TEXT),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["tier"], "full");

    let recorded = gateway.recorded();
    assert_eq!(recorded[0].max_output_tokens, 4096);
}

#[tokio::test]
async fn given_a_chat_request_when_following_up_then_context_reaches_the_system_instruction() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));
    let context = "Amendă de circulație de 500 lei, scadentă pe 15 septembrie.";

    let response = router
        .oneshot(json_request(
            "/api/claude",
            serde_json::json!({
                "messages": [
                    {"role": "user", "content": "Pot plăti jumătate în 15 zile?"}
                ],
                "documentContext": context,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["response"], "Explicație de test.");
    assert_eq!(json["usage"]["output_tokens"], 34);

    let recorded = gateway.recorded();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].system_instruction.ends_with(context));
    assert_eq!(recorded[0].max_output_tokens, 2048);
}

#[tokio::test]
async fn given_a_chat_request_without_messages_when_following_up_then_400() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    let response = router
        .oneshot(json_request("/api/claude", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(gateway.recorded().is_empty());
}

#[tokio::test]
async fn given_a_direct_image_analysis_when_requested_then_extraction_is_bypassed() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app(RICH_OCR_TEXT, Arc::clone(&gateway));
    let image_bytes = vec![0xffu8, 0xd8, 0xff, 0xe0];

    let response = router
        .oneshot(json_request(
            "/api/analyze-image",
            serde_json::json!({
                "image": {
                    "base64": general_purpose::STANDARD.encode(&image_bytes),
                    "mimeType": "image/jpeg",
                },
                "type": "preview",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["multimodal"], true);
    assert!(json.get("extraction_method").is_none());

    let recorded = gateway.recorded();
    assert_eq!(recorded.len(), 1);
    match &recorded[0].messages[0].content {
        MessageContent::TextWithAttachment { attachment, .. } => {
            assert_eq!(attachment.media_type, "image/jpeg");
        }
        other => panic!("expected an image attachment, got {other:?}"),
    }
}

#[tokio::test]
async fn given_an_unknown_analysis_type_when_analyzing_an_image_then_400() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    let response = router
        .oneshot(json_request(
            "/api/analyze-image",
            serde_json::json!({
                "image": {"base64": "aGVsbG8=", "mimeType": "image/png"},
                "type": "amandoua",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(gateway.recorded().is_empty());
}

#[tokio::test]
async fn given_a_rate_limited_provider_when_interpreting_then_the_caller_sees_429() {
    let ocr: Arc<dyn OcrEngine> = Arc::new(MockOcrEngine::new(""));
    let extractor = Arc::new(DocumentTextExtractor::new(ocr));
    let state = AppState {
        interpretation_service: Arc::new(InterpretationService::new(
            extractor,
            Arc::new(RateLimitedGateway),
        )),
        payment_verifier: Arc::new(AllowAllVerifier),
        settings: test_settings(20),
    };
    let router = create_router(state);

    let response = router
        .oneshot(multipart_request(
            "/api/interpret",
            text_form(FINE_NOTICE_TEXT),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn given_identical_text_submissions_when_interpreting_twice_then_payloads_are_identical() {
    let gateway = Arc::new(RecordingGateway::default());
    let router = app("", Arc::clone(&gateway));

    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(multipart_request(
                "/api/interpret",
                text_form(FINE_NOTICE_TEXT),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let recorded = gateway.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0], recorded[1]);
}
