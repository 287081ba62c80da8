pub mod error;
pub mod nest;
pub mod payload;
pub mod record;
pub mod revision;

pub use error::CoreError;
pub use payload::{RefUpdate, UpdatePayload};
pub use record::{CommitMeta, CommitRecord, ParentRef, Signature};
pub use revision::parse_revision;
