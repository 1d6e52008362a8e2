use async_trait::async_trait;

use crate::application::ports::{PaymentError, PaymentVerifier};

/// Pass-through verifier. Enforcement belongs to an external collaborator;
/// deployments that gate the full tier swap in a real implementation here.
pub struct AllowAllVerifier;

#[async_trait]
impl PaymentVerifier for AllowAllVerifier {
    async fn verify(&self, _authorization: Option<&str>) -> Result<(), PaymentError> {
        Ok(())
    }
}
