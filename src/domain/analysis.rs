/// Service tier of a request. Fixed when the request arrives, never changes
/// mid-pipeline; selects the prompt template and token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisTier {
    Preview,
    Full,
    ChatFollowup,
}

impl AnalysisTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Full => "full",
            Self::ChatFollowup => "chat_followup",
        }
    }

    /// Parses the tier strings callers send on the JSON endpoints.
    pub fn from_request_str(s: &str) -> Option<Self> {
        match s {
            "preview" => Some(Self::Preview),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// The quality gate's verdict on an extraction: either the extracted text is
/// trustworthy enough to send, or the original artifact goes to the model
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    UseExtractedText(String),
    UseMultimodalFallback,
}
