use async_trait::async_trait;

use skyliner_core::UpdatePayload;

use crate::DeliveryError;

/// Result of a single delivery attempt.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Success,
    /// The request never got a usable answer; trying again may help.
    RetryableFailure(DeliveryError),
    /// The server answered and refused or misunderstood the payload.
    TerminalFailure(DeliveryError),
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Success)
    }
}

#[async_trait]
pub trait DeliveryTransport: Send + Sync {
    /// Make exactly one attempt to hand `payload` to the remote service.
    async fn deliver(&self, payload: &UpdatePayload) -> DeliveryOutcome;
}
