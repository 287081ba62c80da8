use serde_json::{Map, Value};

use crate::CoreError;

pub const PATH_SEPARATOR: char = '.';

/// Insert `value` at a dotted path, creating intermediate objects on demand.
///
/// Siblings already present under a shared parent are kept; only the leaf
/// named by the last segment is written. Descending through a key that holds
/// a non-object value is a [`CoreError::PathConflict`].
pub fn insert_path(
    root: &mut Map<String, Value>,
    path: &str,
    value: Value,
) -> Result<(), CoreError> {
    let mut segments = path.split(PATH_SEPARATOR).peekable();
    let mut node = root;
    let mut walked = String::new();

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            node.insert(segment.to_string(), value);
            return Ok(());
        }

        if !walked.is_empty() {
            walked.push(PATH_SEPARATOR);
        }
        walked.push_str(segment);

        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match child {
            Value::Object(map) => map,
            _ => {
                return Err(CoreError::PathConflict {
                    path: path.to_string(),
                    at: walked,
                })
            }
        };
    }

    Ok(())
}
