use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::CommitRecord;
use crate::CoreError;

/// One `before after ref` line from the hook's standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefUpdate {
    pub before: String,
    pub after: String,
    pub ref_name: String,
}

impl RefUpdate {
    /// Parse a post-receive input line. Blank lines yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CoreError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Ok(None),
            [before, after, ref_name] => Ok(Some(Self {
                before: before.to_string(),
                after: after.to_string(),
                ref_name: ref_name.to_string(),
            })),
            _ => Err(CoreError::InvalidRefUpdate(line.to_string())),
        }
    }
}

impl fmt::Display for RefUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{}", self.ref_name, self.before, self.after)
    }
}

/// The body submitted to Skyliner for one ref update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub before: String,
    pub after: String,
    /// Oldest first.
    pub commits: Vec<CommitRecord>,
}

impl UpdatePayload {
    pub fn new(update: RefUpdate, commits: Vec<CommitRecord>) -> Self {
        Self {
            ref_name: update.ref_name,
            before: update.before,
            after: update.after,
            commits,
        }
    }
}
