use std::time::Duration;

use skyliner_core::UpdatePayload;

use crate::transport::{DeliveryOutcome, DeliveryTransport};
use crate::DeliveryError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(200);

/// Attempt budget and linear backoff between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    /// Delay after the zero-based `attempt` failed. The first retry is immediate.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base * attempt
    }
}

#[derive(Debug)]
pub enum DeliveryReport {
    Delivered { attempts: u32 },
    GivenUp { attempts: u32, reason: DeliveryError },
}

impl DeliveryReport {
    pub fn attempts(&self) -> u32 {
        match self {
            DeliveryReport::Delivered { attempts } | DeliveryReport::GivenUp { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryReport::Delivered { .. })
    }
}

/// Deliver `payload`, retrying transport failures up to the policy's budget.
///
/// Never fails: giving up is logged and reported, so one bad update does not
/// stop the ones after it.
pub async fn deliver_with_retry<T>(
    transport: &T,
    payload: &UpdatePayload,
    policy: &RetryPolicy,
) -> DeliveryReport
where
    T: DeliveryTransport + ?Sized,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match transport.deliver(payload).await {
            DeliveryOutcome::Success => {
                tracing::info!(
                    "reported {} commits on {} (attempt {})",
                    payload.commits.len(),
                    payload.ref_name,
                    attempt + 1
                );
                return DeliveryReport::Delivered {
                    attempts: attempt + 1,
                };
            }
            DeliveryOutcome::TerminalFailure(reason) => {
                tracing::warn!(
                    "delivery for {} failed permanently; not retrying\n{}",
                    payload.ref_name,
                    reason.diagnostic()
                );
                return DeliveryReport::GivenUp {
                    attempts: attempt + 1,
                    reason,
                };
            }
            DeliveryOutcome::RetryableFailure(reason) => {
                if attempt + 1 >= max_attempts {
                    tracing::warn!(
                        "giving up on {} after {} attempts\n{}",
                        payload.ref_name,
                        max_attempts,
                        reason.diagnostic()
                    );
                    return DeliveryReport::GivenUp {
                        attempts: attempt + 1,
                        reason,
                    };
                }

                let delay = policy.backoff(attempt);
                tracing::warn!(
                    "attempt {}/{} for {} failed: {}; retrying in {:?}",
                    attempt + 1,
                    max_attempts,
                    payload.ref_name,
                    reason,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
