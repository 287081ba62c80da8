pub mod config;
pub mod error;
pub mod history;
pub mod range;

pub use config::GitConfig;
pub use error::GitError;
pub use history::{GitCli, HistorySource, StderrPolicy};
pub use range::{extract_range, parse_range_output, ExtractionPolicy};
