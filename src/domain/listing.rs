//! Decoding of raw repository listings into entries.
//!
//! Accepts the git-trees API shape (`{"tree": [...], "truncated": false}`) or a
//! bare array of entries. Fields other than `path` and `type` are ignored.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::domain::entities::{Entry, EntryKind};
use crate::domain::error::{DomainError, DomainResult};

/// Entries of one listing, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub entries: Vec<Entry>,
    /// Set when the source reported it had to cut the listing short.
    pub truncated: bool,
}

impl Listing {
    /// Decode permissively.
    ///
    /// A wrapper that is not list-shaped gives an empty listing. Elements
    /// without a string `path` or with an unknown `type` are skipped.
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = entry_array(value) else {
            debug!("listing is not list-shaped, treating as empty");
            return Self::default();
        };

        let entries = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match decode_entry(item) {
                Ok(entry) => Some(entry),
                Err(reason) => {
                    debug!(index, %reason, "skipping listing element");
                    None
                }
            })
            .collect();

        Self {
            entries,
            truncated: is_truncated(value),
        }
    }

    /// Decode and reject anything the permissive path would silently repair.
    pub fn from_value_strict(value: &Value) -> DomainResult<Self> {
        let items = entry_array(value).ok_or(DomainError::MalformedListing)?;

        let mut seen = HashSet::with_capacity(items.len());
        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let entry =
                decode_entry(item).map_err(|reason| DomainError::InvalidEntry { index, reason })?;
            if entry.path.is_empty() {
                return Err(DomainError::EmptyPath { index });
            }
            if !seen.insert(entry.path.clone()) {
                return Err(DomainError::DuplicatePath(entry.path));
            }
            entries.push(entry);
        }

        Ok(Self {
            entries,
            truncated: is_truncated(value),
        })
    }
}

fn entry_array(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get("tree").and_then(Value::as_array),
        _ => None,
    }
}

fn is_truncated(value: &Value) -> bool {
    value
        .get("truncated")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn decode_entry(item: &Value) -> Result<Entry, String> {
    let path = item
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing string field 'path'".to_string())?;
    let kind = item
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing string field 'type'".to_string())?;
    let kind = EntryKind::from_git_type(kind).ok_or_else(|| format!("unknown type '{kind}'"))?;
    Ok(Entry::new(path, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_api_shape_when_decoding_then_reads_tree_array() {
        let value = json!({
            "sha": "9fb037999f264ba9a7fc6274d15fa3ae2ab98312",
            "tree": [
                {"path": "src", "mode": "040000", "type": "tree", "sha": "abc"},
                {"path": "src/index.ts", "mode": "100644", "type": "blob", "size": 30}
            ],
            "truncated": false
        });

        let listing = Listing::from_value(&value);

        assert_eq!(
            listing.entries,
            vec![Entry::dir("src"), Entry::file("src/index.ts")]
        );
        assert!(!listing.truncated);
    }

    #[test]
    fn given_bare_array_when_decoding_then_reads_entries() {
        let listing = Listing::from_value(&json!([{"path": "a", "type": "blob"}]));
        assert_eq!(listing.entries, vec![Entry::file("a")]);
    }

    #[test]
    fn given_non_list_wrapper_when_decoding_then_empty() {
        assert!(Listing::from_value(&json!({"tree": "nope"})).entries.is_empty());
        assert!(Listing::from_value(&json!(null)).entries.is_empty());
        assert!(Listing::from_value(&json!(42)).entries.is_empty());
    }

    #[test]
    fn given_bad_elements_when_decoding_permissively_then_skips_them() {
        let value = json!([
            {"path": "ok.rs", "type": "blob"},
            {"type": "blob"},
            {"path": "tag", "type": "tag"},
            "garbage"
        ]);
        assert_eq!(Listing::from_value(&value).entries, vec![Entry::file("ok.rs")]);
    }

    #[test]
    fn given_truncated_flag_when_decoding_then_reported() {
        let listing = Listing::from_value(&json!({"tree": [], "truncated": true}));
        assert!(listing.truncated);
    }

    #[test]
    fn given_non_list_wrapper_when_decoding_strictly_then_errors() {
        assert_eq!(
            Listing::from_value_strict(&json!({"tree": {}})),
            Err(DomainError::MalformedListing)
        );
    }

    #[test]
    fn given_bad_element_when_decoding_strictly_then_reports_index() {
        let err = Listing::from_value_strict(&json!([
            {"path": "a", "type": "tree"},
            {"path": "a/b", "type": "symlink"}
        ]))
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn given_empty_path_when_decoding_strictly_then_errors() {
        assert_eq!(
            Listing::from_value_strict(&json!([{"path": "", "type": "blob"}])),
            Err(DomainError::EmptyPath { index: 0 })
        );
    }

    #[test]
    fn given_duplicate_path_when_decoding_strictly_then_errors() {
        assert_eq!(
            Listing::from_value_strict(&json!([
                {"path": "src", "type": "tree"},
                {"path": "src", "type": "blob"}
            ])),
            Err(DomainError::DuplicatePath("src".into()))
        );
    }
}
