use std::sync::Arc;

use crate::application::ports::{LlmGateway, PaymentVerifier, TextExtractor};
use crate::application::services::InterpretationService;
use crate::presentation::config::Settings;

pub struct AppState<E, L, P>
where
    E: TextExtractor,
    L: LlmGateway,
    P: PaymentVerifier,
{
    pub interpretation_service: Arc<InterpretationService<E, L>>,
    pub payment_verifier: Arc<P>,
    pub settings: Settings,
}

impl<E, L, P> Clone for AppState<E, L, P>
where
    E: TextExtractor,
    L: LlmGateway,
    P: PaymentVerifier,
{
    fn clone(&self) -> Self {
        Self {
            interpretation_service: Arc::clone(&self.interpretation_service),
            payment_verifier: Arc::clone(&self.payment_verifier),
            settings: self.settings.clone(),
        }
    }
}
