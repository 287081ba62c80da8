use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Io(#[from] std::io::Error),
    #[error("`git {command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("git output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("core error: {0}")]
    Core(#[from] skyliner_core::CoreError),
    #[error("invalid value for {key}: {value:?}")]
    InvalidConfigValue { key: String, value: String },
}
