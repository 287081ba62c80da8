use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;

use skyliner_core::UpdatePayload;
use skyliner_sync::{DeliveryError, DeliveryOutcome, DeliveryTransport};

/// Writes each payload as pretty JSON instead of sending it.
pub struct DryRunTransport<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> DryRunTransport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> DeliveryTransport for DryRunTransport<W> {
    async fn deliver(&self, payload: &UpdatePayload) -> DeliveryOutcome {
        let body = match serde_json::to_string_pretty(payload) {
            Ok(body) => body,
            Err(e) => return DeliveryOutcome::TerminalFailure(DeliveryError::Encode(e)),
        };

        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{body}") {
            tracing::warn!("could not write dry-run payload: {}", e);
        }
        DeliveryOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyliner_core::RefUpdate;

    #[tokio::test]
    async fn prints_payload_json() {
        let transport = DryRunTransport::new(Vec::new());
        let payload = UpdatePayload::new(
            RefUpdate {
                before: "abc123".into(),
                after: "def456".into(),
                ref_name: "refs/heads/main".into(),
            },
            Vec::new(),
        );

        assert!(transport.deliver(&payload).await.is_success());

        let printed = String::from_utf8(transport.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value["ref"], "refs/heads/main");
        assert_eq!(value["commits"], serde_json::json!([]));
    }
}
