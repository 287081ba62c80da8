use serde_json::{Map, Value};

use crate::nest::insert_path;
use crate::record::CommitRecord;
use crate::CoreError;

/// Separates the positional fields of one revision record.
pub const FIELD_SEPARATOR: char = '\0';

/// Field paths in the order git prints them.
pub const REVISION_FIELDS: [&str; 9] = [
    "sha",
    "parents",
    "ref",
    "commit.committer.name",
    "commit.committer.email",
    "commit.committer.date",
    "commit.author.name",
    "commit.author.email",
    "commit.author.date",
];

/// `git log` placeholders producing [`REVISION_FIELDS`], index for index.
pub const REVISION_PLACEHOLDERS: [&str; 9] = [
    "%H", "%P", "%d", "%cn", "%ce", "%cI", "%an", "%ae", "%aI",
];

const PARENTS_FIELD: &str = "parents";

/// The `--format` argument that makes git emit one record per commit.
pub fn revision_format() -> String {
    REVISION_PLACEHOLDERS.join("%x00")
}

/// Expand one raw record into a nested JSON object keyed by [`REVISION_FIELDS`].
pub fn nest_revision(raw: &str) -> Result<Map<String, Value>, CoreError> {
    let values: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    if values.len() != REVISION_FIELDS.len() {
        return Err(CoreError::FieldCount {
            expected: REVISION_FIELDS.len(),
            found: values.len(),
        });
    }

    let mut record = Map::new();
    for (path, value) in REVISION_FIELDS.iter().zip(values) {
        insert_path(&mut record, path, field_value(path, value))?;
    }
    Ok(record)
}

/// Parse one raw record into a [`CommitRecord`].
pub fn parse_revision(raw: &str) -> Result<CommitRecord, CoreError> {
    let record = nest_revision(raw)?;
    Ok(serde_json::from_value(Value::Object(record))?)
}

fn field_value(path: &str, raw: &str) -> Value {
    if path != PARENTS_FIELD {
        return Value::String(raw.to_string());
    }

    // A root commit prints an empty parent list.
    if raw.is_empty() {
        return Value::Array(Vec::new());
    }

    Value::Array(
        raw.split(' ')
            .map(|sha| {
                let mut parent = Map::new();
                parent.insert("sha".to_string(), Value::String(sha.to_string()));
                Value::Object(parent)
            })
            .collect(),
    )
}
