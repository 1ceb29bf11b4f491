// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Mapping between the canonical model and the YAML/JSON tree
//!
//! The tree is a sequence with one entry per host block:
//!
//! ```json
//! [ { "Host": "example.com", "params": [["HostName", "example.com"], ["User", "deploy"]] } ]
//! ```
//!
//! Parameters are `[key, value]` pairs rather than mapping entries so that
//! repeated keys and their order survive. Retained comments add an optional
//! `"comments": [{"offset": 1, "text": "# ..."}]` field.
//!
//! Both `serde_json` and `serde_yaml` read into and write from
//! [`serde_json::Value`], so one tree type serves both formats.
//!
//! # Examples
//!
//! ```rust
//! use sshconv::codec::{from_tree, to_tree};
//! use sshconv::model::{HostBlock, SshConfigModel};
//!
//! let model = SshConfigModel::from_hosts(vec![
//!     HostBlock::new(["example.com"]).with_param("User", "deploy"),
//! ]);
//! let tree = to_tree(&model);
//! assert_eq!(tree[0]["Host"], "example.com");
//! assert_eq!(from_tree(&tree).unwrap(), model);
//! ```

mod error;

pub use error::CodecError;

use serde_json::{json, Map, Value};

use crate::model::{Comment, HostBlock, Parameter, SshConfigModel};

pub const HOST_FIELD: &str = "Host";
pub const PARAMS_FIELD: &str = "params";
pub const COMMENTS_FIELD: &str = "comments";

/// Build the tree for a model
pub fn to_tree(model: &SshConfigModel) -> Value {
    Value::Array(model.iter().map(host_to_entry).collect())
}

fn host_to_entry(host: &HostBlock) -> Value {
    let mut entry = Map::new();
    entry.insert(HOST_FIELD.to_string(), Value::String(host.pattern_string()));
    entry.insert(
        PARAMS_FIELD.to_string(),
        Value::Array(
            host.parameters
                .iter()
                .map(|p| json!([p.key, p.value]))
                .collect(),
        ),
    );
    if !host.comments.is_empty() {
        entry.insert(
            COMMENTS_FIELD.to_string(),
            Value::Array(
                sorted_comments(host)
                    .map(|c| json!({ "offset": c.offset, "text": c.text }))
                    .collect(),
            ),
        );
    }
    Value::Object(entry)
}

/// Comments in ascending offset order, insertion order within an offset
fn sorted_comments(host: &HostBlock) -> impl Iterator<Item = &Comment> {
    let mut comments: Vec<&Comment> = host.comments.iter().collect();
    comments.sort_by_key(|c| c.offset);
    comments.into_iter()
}

/// Rebuild a model from a tree
///
/// Accepted roots, besides the canonical sequence: `null` (an empty
/// document), a `{"hosts": [...]}` wrapper, and a single entry object.
pub fn from_tree(tree: &Value) -> Result<SshConfigModel, CodecError> {
    let entries: &[Value] = match tree {
        Value::Array(entries) => entries,
        Value::Null => &[],
        Value::Object(map) => {
            if let Some(inner) = map.get("hosts") {
                return match inner {
                    Value::Array(_) | Value::Null => from_tree(inner),
                    other => Err(CodecError::UnexpectedShape {
                        found: describe(other),
                    }),
                };
            }
            if map.contains_key(HOST_FIELD) {
                std::slice::from_ref(tree)
            } else {
                return Err(CodecError::UnexpectedShape {
                    found: "a mapping without 'Host' or 'hosts'",
                });
            }
        }
        other => {
            return Err(CodecError::UnexpectedShape {
                found: describe(other),
            });
        }
    };

    let hosts = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry_to_host(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SshConfigModel::from_hosts(hosts))
}

fn entry_to_host(index: usize, entry: &Value) -> Result<HostBlock, CodecError> {
    let Value::Object(map) = entry else {
        return Err(CodecError::MissingHost { index });
    };

    let patterns = map
        .get(HOST_FIELD)
        .and_then(host_patterns)
        .ok_or(CodecError::MissingHost { index })?;

    let mut host = HostBlock::new(patterns);

    match map.get(PARAMS_FIELD) {
        None | Some(Value::Null) => {}
        Some(Value::Array(pairs)) => {
            for (position, pair) in pairs.iter().enumerate() {
                host.parameters.push(pair_to_param(index, position, pair)?);
            }
        }
        Some(other) => {
            return Err(CodecError::MalformedParameter {
                index,
                detail: format!("'params' is {}, expected a sequence", describe(other)),
            });
        }
    }

    // Flat `Key: value` fields, as written by older versions of this tool
    for (key, value) in map {
        if key == HOST_FIELD || key == PARAMS_FIELD || key == COMMENTS_FIELD {
            continue;
        }
        append_flat_field(&mut host, index, key, value)?;
    }

    if let Some(comments) = map.get(COMMENTS_FIELD) {
        host.comments = entry_comments(index, &host, comments)?;
    }

    Ok(host)
}

fn host_patterns(value: &Value) -> Option<Vec<String>> {
    let patterns: Vec<String> = match value {
        Value::String(s) => s.split_whitespace().map(str::to_string).collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::trim).map(str::to_string))
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect(),
        _ => return None,
    };

    if patterns.is_empty() {
        None
    } else {
        Some(patterns)
    }
}

fn pair_to_param(index: usize, position: usize, pair: &Value) -> Result<Parameter, CodecError> {
    let malformed = |detail: String| CodecError::MalformedParameter { index, detail };

    let Some([key, value]): Option<&[Value; 2]> = pair
        .as_array()
        .and_then(|items| items.as_slice().try_into().ok())
    else {
        return Err(malformed(format!(
            "element {position} is not a [key, value] pair"
        )));
    };

    let key = match key.as_str() {
        Some(k) if !k.is_empty() => k,
        _ => {
            return Err(malformed(format!(
                "element {position} has a key that is not a non-empty string"
            )));
        }
    };

    let value = scalar_to_string(value).ok_or_else(|| {
        malformed(format!(
            "element {position} has a value that is {}, expected a scalar",
            describe(value)
        ))
    })?;

    Ok(Parameter::new(key, value))
}

fn append_flat_field(
    host: &mut HostBlock,
    index: usize,
    key: &str,
    value: &Value,
) -> Result<(), CodecError> {
    let malformed = || CodecError::MalformedParameter {
        index,
        detail: format!("field '{key}' must be a scalar or a sequence of scalars"),
    };

    if key.is_empty() {
        return Err(malformed());
    }

    match value {
        Value::Array(items) => {
            for item in items {
                let value = scalar_to_string(item).ok_or_else(malformed)?;
                host.push_param(key, value);
            }
        }
        other => {
            let value = scalar_to_string(other).ok_or_else(malformed)?;
            host.push_param(key, value);
        }
    }
    Ok(())
}

fn entry_comments(
    index: usize,
    host: &HostBlock,
    value: &Value,
) -> Result<Vec<Comment>, CodecError> {
    let malformed = |detail: String| CodecError::MalformedComment { index, detail };

    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            return Err(malformed(format!(
                "'comments' is {}, expected a sequence",
                describe(other)
            )));
        }
    };

    let mut comments = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let offset = item
            .get("offset")
            .and_then(Value::as_u64)
            .and_then(|o| usize::try_from(o).ok())
            .ok_or_else(|| malformed(format!("element {position} has no integer 'offset'")))?;
        let text = item
            .get("text")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed(format!("element {position} has no string 'text'")))?;

        if offset > host.line_count() {
            return Err(malformed(format!(
                "element {position} has offset {offset} past the end of the entry"
            )));
        }
        if !text.starts_with('#') || text.contains(['\n', '\r']) {
            return Err(malformed(format!(
                "element {position} is not a single line starting with '#'"
            )));
        }

        comments.push(Comment::new(offset, text));
    }

    // Writers emit comments grouped by offset; keep the model in that order
    comments.sort_by_key(|c| c.offset);
    Ok(comments)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("yes".to_string()),
        Value::Bool(false) => Some("no".to_string()),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
