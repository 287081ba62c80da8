use std::error::Error as _;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("could not encode payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed response: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("server reported an error: {}", .0.as_deref().unwrap_or("no detail given"))]
    Rejected(Option<String>),
}

impl DeliveryError {
    /// The error followed by every deeper cause, one per line.
    ///
    /// Each variant already prints its direct source, so the chain starts
    /// one level down.
    pub fn diagnostic(&self) -> String {
        let mut msg = self.to_string();
        let mut cause = self.source().and_then(|err| err.source());
        while let Some(err) = cause {
            msg.push_str(&format!("\n  caused by: {err}"));
            cause = err.source();
        }
        if let DeliveryError::MalformedResponse { body, .. } = self {
            msg.push_str(&format!("\n  response body: {body}"));
        }
        msg
    }
}
