/// Which strategy produced the text of an [`ExtractionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionMethod {
    /// Inline text pasted by the caller, taken as-is.
    DirectText,
    /// Text layer read natively out of a PDF.
    PdfNativeText,
    /// The PDF had no usable text layer (or the parser failed); the artifact
    /// must be sent to the model in multimodal form instead.
    PdfScannedFallback,
    /// Optical character recognition over an image.
    ImageOcr,
    /// Verbatim read of a text/plain upload.
    PlainTextRead,
    Unknown,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectText => "direct_text",
            Self::PdfNativeText => "pdf_native_text",
            Self::PdfScannedFallback => "pdf_scanned_fallback",
            Self::ImageOcr => "image_ocr",
            Self::PlainTextRead => "plain_text_read",
            Self::Unknown => "unknown",
        }
    }
}

/// Output of the text extractor. Created once per submission, consumed once
/// by the quality gate, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub text: String,
    pub method: ExtractionMethod,
    pub succeeded: bool,
}

impl ExtractionResult {
    pub fn new(text: String, method: ExtractionMethod) -> Self {
        let succeeded = !text.trim().is_empty();
        Self {
            text,
            method,
            succeeded,
        }
    }

    /// Inline pasted text, no extraction needed.
    pub fn direct(text: String) -> Self {
        Self::new(text, ExtractionMethod::DirectText)
    }

    /// Empty result carrying only its method tag.
    pub fn empty(method: ExtractionMethod) -> Self {
        Self {
            text: String::new(),
            method,
            succeeded: false,
        }
    }
}
