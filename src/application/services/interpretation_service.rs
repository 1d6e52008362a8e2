use std::sync::Arc;

use crate::application::ports::{
    ExtractionError, LlmGateway, LlmGatewayError, TextExtractor,
};
use crate::domain::{
    AnalysisTier, ContentType, ConversationTurn, ExtractionMethod, ExtractionResult, RawArtifact,
    RoutingDecision, Submission, UsageMetadata,
};

use super::prompt_table::PromptTable;
use super::quality_gate::QualityGate;
use super::request_assembler::{AssemblyError, RequestAssembler};
use super::validation::ValidationError;

/// The per-request pipeline: validate → extract → quality-gate → assemble →
/// model call → shape. Stages run strictly in order and nothing is retried;
/// a failure at any stage terminates the request.
pub struct InterpretationService<E, L>
where
    E: TextExtractor,
    L: LlmGateway,
{
    extractor: Arc<E>,
    gateway: Arc<L>,
    quality_gate: QualityGate,
    assembler: RequestAssembler,
}

#[derive(Debug, Clone)]
pub struct Interpretation {
    pub text: String,
    pub tier: AnalysisTier,
    pub extraction_method: Option<ExtractionMethod>,
    pub routed_multimodal: bool,
    pub usage: Option<UsageMetadata>,
}

#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("assembly: {0}")]
    Assembly(#[from] AssemblyError),
    #[error("gateway: {0}")]
    Gateway(#[from] LlmGatewayError),
    #[error("payment required for the full analysis tier")]
    PaymentRequired,
}

impl<E, L> InterpretationService<E, L>
where
    E: TextExtractor,
    L: LlmGateway,
{
    pub fn new(extractor: Arc<E>, gateway: Arc<L>) -> Self {
        Self {
            extractor,
            gateway,
            quality_gate: QualityGate::new(),
            assembler: RequestAssembler::new(PromptTable::builtin()),
        }
    }

    #[tracing::instrument(skip_all, fields(tier = tier.as_str()))]
    pub async fn interpret(
        &self,
        submission: Submission,
        tier: AnalysisTier,
    ) -> Result<Interpretation, InterpretationError> {
        let (extraction, artifact) = match submission {
            Submission::InlineText(text) => {
                if text.trim().is_empty() {
                    return Err(ValidationError::EmptySubmission.into());
                }
                (ExtractionResult::direct(text), None)
            }
            Submission::File { document, data } => {
                let extraction = self.extractor.extract(&data, &document).await?;

                let artifact = match document.content_type {
                    ContentType::Pdf => {
                        Some(RawArtifact::new(ContentType::Pdf.as_mime(), data))
                    }
                    ContentType::Image => {
                        Some(RawArtifact::new(document.declared_mime.clone(), data))
                    }
                    ContentType::Text => None,
                };

                (extraction, artifact)
            }
        };

        let method = extraction.method;
        let decision = self.quality_gate.decide(&extraction, artifact.is_some())?;
        let routed_multimodal = decision == RoutingDecision::UseMultimodalFallback;

        tracing::info!(
            method = method.as_str(),
            multimodal = routed_multimodal,
            "Routing decided"
        );

        let request = self.assembler.assemble(tier, decision, artifact)?;
        let response = self.gateway.generate(&request).await?;

        Ok(Interpretation {
            text: response.generated_text,
            tier,
            extraction_method: Some(method),
            routed_multimodal,
            usage: response.usage,
        })
    }

    /// Follow-up question over caller-supplied history; nothing about the
    /// conversation survives this call.
    #[tracing::instrument(skip_all, fields(turns = turns.len()))]
    pub async fn follow_up(
        &self,
        turns: Vec<ConversationTurn>,
        system_override: Option<String>,
        image: Option<RawArtifact>,
        document_context: Option<String>,
    ) -> Result<Interpretation, InterpretationError> {
        if turns.is_empty() {
            return Err(ValidationError::EmptyConversation.into());
        }

        let request = self.assembler.assemble_chat(
            &turns,
            system_override.as_deref(),
            image,
            document_context.as_deref(),
        );
        let response = self.gateway.generate(&request).await?;

        Ok(Interpretation {
            text: response.generated_text,
            tier: AnalysisTier::ChatFollowup,
            extraction_method: None,
            routed_multimodal: false,
            usage: response.usage,
        })
    }

    /// Direct multimodal analysis of an image or PDF, bypassing extraction.
    #[tracing::instrument(skip_all, fields(tier = tier.as_str(), media_type = %artifact.media_type))]
    pub async fn analyze_artifact(
        &self,
        artifact: RawArtifact,
        tier: AnalysisTier,
    ) -> Result<Interpretation, InterpretationError> {
        if ContentType::from_mime(&artifact.media_type)
            .map(|ct| ct == ContentType::Text)
            .unwrap_or(true)
        {
            return Err(ValidationError::UnsupportedMediaType(artifact.media_type).into());
        }

        let request =
            self.assembler
                .assemble(tier, RoutingDecision::UseMultimodalFallback, Some(artifact))?;
        let response = self.gateway.generate(&request).await?;

        Ok(Interpretation {
            text: response.generated_text,
            tier,
            extraction_method: None,
            routed_multimodal: true,
            usage: response.usage,
        })
    }
}
