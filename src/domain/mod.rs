mod analysis;
mod conversation;
mod document;
mod extraction;
mod llm;

pub use analysis::{AnalysisTier, RoutingDecision};
pub use conversation::{ConversationTurn, TurnRole};
pub use document::{ContentType, DocumentId, RawArtifact, SubmittedDocument, Submission};
pub use extraction::{ExtractionMethod, ExtractionResult};
pub use llm::{
    Attachment, GatewayMessage, GatewayRole, LlmRequest, LlmResponse, MessageContent,
    UsageMetadata,
};
