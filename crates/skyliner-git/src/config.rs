use std::collections::BTreeMap;

use crate::history::{GitCli, StderrPolicy};
use crate::GitError;

/// Flat `section.key` settings as reported by `git config --list -z`.
///
/// Keys are compared case-insensitively. When a key repeats, the last
/// value wins, matching `git config --get`.
#[derive(Debug, Clone, Default)]
pub struct GitConfig {
    entries: BTreeMap<String, Option<String>>,
}

impl GitConfig {
    /// Read every setting visible to `git`. Only the exit status decides
    /// failure; warnings on stderr are logged.
    pub fn load(git: &GitCli) -> Result<Self, GitError> {
        let raw = git.run_with(&["config", "--list", "-z"], StderrPolicy::Log)?;
        Ok(Self::parse(&raw))
    }

    /// Parse NUL-terminated `key\nvalue` entries. A key with no newline
    /// has no value (`[section] key` with nothing after it).
    pub fn parse(raw: &str) -> Self {
        let mut entries = BTreeMap::new();
        for entry in raw.split('\0').filter(|e| !e.is_empty()) {
            let (key, value) = match entry.split_once('\n') {
                Some((key, value)) => (key, Some(value.to_string())),
                None => (entry, None),
            };
            entries.insert(key.to_ascii_lowercase(), value);
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .and_then(|v| v.as_deref())
    }

    /// Read a boolean using git's spellings. A bare key counts as true.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, GitError> {
        let Some(value) = self.entries.get(&key.to_ascii_lowercase()) else {
            return Ok(None);
        };
        let Some(value) = value else {
            return Ok(Some(true));
        };

        match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Some(true)),
            "false" | "no" | "off" | "0" | "" => Ok(Some(false)),
            _ => Err(GitError::InvalidConfigValue {
                key: key.to_string(),
                value: value.clone(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GitConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into().to_ascii_lowercase(), Some(v.into())))
            .collect();
        Self { entries }
    }
}
