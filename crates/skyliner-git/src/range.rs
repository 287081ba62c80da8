use skyliner_core::revision::parse_revision;
use skyliner_core::{CommitRecord, CoreError, RefUpdate, UpdatePayload};

use crate::history::HistorySource;
use crate::GitError;

/// `git rev-list --format` prints this before every record.
pub const HEADER_PREFIX: &str = "commit ";

/// What to do when the history query fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// Report the update with zero commits.
    #[default]
    BestEffort,
    /// Return the error to the caller.
    Strict,
}

/// Turn raw `rev-list` output into commit records, dropping header lines.
pub fn parse_range_output(raw: &str) -> Result<Vec<CommitRecord>, CoreError> {
    raw.lines()
        .filter(|line| !line.is_empty() && !line.starts_with(HEADER_PREFIX))
        .map(parse_revision)
        .collect()
}

/// Collect the commits `update` introduced and wrap them in a payload.
pub fn extract_range<S>(
    source: &S,
    update: RefUpdate,
    policy: ExtractionPolicy,
) -> Result<UpdatePayload, GitError>
where
    S: HistorySource + ?Sized,
{
    let commits = match query_commits(source, &update) {
        Ok(commits) => commits,
        Err(e) if policy == ExtractionPolicy::BestEffort => {
            tracing::warn!("could not list commits for {}: {}; reporting none", update, e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let merges = commits.iter().filter(|c| c.is_merge()).count();
    tracing::debug!("{}: {} commits ({} merges)", update, commits.len(), merges);
    Ok(UpdatePayload::new(update, commits))
}

fn query_commits<S>(source: &S, update: &RefUpdate) -> Result<Vec<CommitRecord>, GitError>
where
    S: HistorySource + ?Sized,
{
    let raw = source.rev_list(&update.before, &update.after)?;
    Ok(parse_range_output(&raw)?)
}
