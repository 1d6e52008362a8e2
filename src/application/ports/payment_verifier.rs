use async_trait::async_trait;

/// External check gating the full-analysis tier. Runs before any extraction
/// work starts; a refusal short-circuits the whole pipeline.
#[async_trait]
pub trait PaymentVerifier: Send + Sync {
    async fn verify(&self, authorization: Option<&str>) -> Result<(), PaymentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment not verified")]
    NotVerified,
    #[error("payment verification failed: {0}")]
    VerificationFailed(String),
}
