pub mod config;
pub mod dry_run;
pub mod error;
pub mod hook;

pub use config::HookConfig;
pub use hook::{Hook, HookSummary};
