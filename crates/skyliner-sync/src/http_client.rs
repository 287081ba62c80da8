use async_trait::async_trait;
use serde_json::Value;

use skyliner_core::UpdatePayload;

use crate::transport::{DeliveryOutcome, DeliveryTransport};
use crate::DeliveryError;

pub const DEFAULT_SERVER: &str = "https://www.skyliner.io";

/// Where and as whom commit batches are submitted.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub server: String,
    pub token: String,
    pub repo_name: String,
}

#[derive(Debug, Clone)]
pub struct HttpDeliveryClient {
    config: DeliveryConfig,
    client: reqwest::Client,
}

impl HttpDeliveryClient {
    pub fn new(config: DeliveryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, token: &str) -> String {
        format!(
            "{}/commits/{}/{}",
            self.config.server.trim_end_matches('/'),
            urlencoding::encode(token),
            urlencoding::encode(&self.config.repo_name)
        )
    }

    pub fn submission_url(&self) -> String {
        self.endpoint(&self.config.token)
    }

    async fn post(&self, body: String) -> Result<String, DeliveryError> {
        let resp = self
            .client
            .post(self.submission_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!("response {}: {}", status, text);

        if !status.is_success() {
            return Err(DeliveryError::Status { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait]
impl DeliveryTransport for HttpDeliveryClient {
    async fn deliver(&self, payload: &UpdatePayload) -> DeliveryOutcome {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(e) => return DeliveryOutcome::TerminalFailure(DeliveryError::Encode(e)),
        };
        // The token is a credential; keep it out of the logs.
        tracing::debug!("POST {}", self.endpoint("<token>"));
        tracing::debug!("payload: {}", body);

        match self.post(body).await {
            Ok(text) => classify_response(&text),
            Err(e) => DeliveryOutcome::RetryableFailure(e),
        }
    }
}

/// Classify a 2xx response body by its `ok` acknowledgement.
pub fn classify_response(body: &str) -> DeliveryOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(source) => {
            return DeliveryOutcome::TerminalFailure(DeliveryError::MalformedResponse {
                source,
                body: body.to_string(),
            })
        }
    };

    match value.get("ok") {
        Some(Value::Bool(true)) => DeliveryOutcome::Success,
        Some(Value::Bool(false)) => {
            let detail = value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string);
            DeliveryOutcome::TerminalFailure(DeliveryError::Rejected(detail))
        }
        _ => DeliveryOutcome::TerminalFailure(DeliveryError::UnexpectedShape(body.to_string())),
    }
}
