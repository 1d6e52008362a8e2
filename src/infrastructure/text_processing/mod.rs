mod document_text_extractor;
mod text_sanitizer;

pub use document_text_extractor::DocumentTextExtractor;
pub use text_sanitizer::sanitize_extracted_text;
