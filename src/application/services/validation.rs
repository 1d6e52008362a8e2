/// Request problems the caller can fix. The presentation boundary translates
/// every variant to a 4xx with a user-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("no file and no text supplied")]
    EmptySubmission,
    #[error("extracted content too short to analyze")]
    InsufficientText,
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("file of {size_bytes} bytes exceeds the {max_bytes} byte limit")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
    #[error("conversation history missing or empty")]
    EmptyConversation,
    #[error("attached image could not be decoded")]
    InvalidImage,
    #[error("unknown analysis type: {0}")]
    UnknownAnalysisType(String),
    #[error("unknown conversation role: {0}")]
    UnknownRole(String),
}
