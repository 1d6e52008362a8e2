mod llm_gateway;
mod ocr_engine;
mod payment_verifier;
mod text_extractor;

pub use llm_gateway::{LlmGateway, LlmGatewayError};
pub use ocr_engine::{OcrEngine, OcrError};
pub use payment_verifier::{PaymentError, PaymentVerifier};
pub use text_extractor::{ExtractionError, TextExtractor};
