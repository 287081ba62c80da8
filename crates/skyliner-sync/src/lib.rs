pub mod error;
pub mod http_client;
pub mod retry;
pub mod transport;

pub use error::DeliveryError;
pub use http_client::{DeliveryConfig, HttpDeliveryClient, DEFAULT_SERVER};
pub use retry::{deliver_with_retry, DeliveryReport, RetryPolicy};
pub use transport::{DeliveryOutcome, DeliveryTransport};
