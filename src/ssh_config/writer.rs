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

//! ssh_config writing
//!
//! Output layout:
//!
//! ```text
//! Host pattern1 pattern2
//!     Key value
//!     Key "value with spaces"
//!
//! Host next
//! ```
//!
//! Every line is checked against the reader's own tokenizer before it is
//! emitted, so anything the writer produces reads back into the same model.

use std::fmt::Write as _;

use crate::model::{HostBlock, SshConfigModel};
use crate::ssh_config::error::SerializeError;
use crate::ssh_config::parser::{split_directive, unquote};

const INDENT: &str = "    ";

/// Serialize a model into ssh_config text
///
/// Output always ends with exactly one newline, so an empty model
/// serializes to `"\n"`.
pub fn serialize(model: &SshConfigModel) -> Result<String, SerializeError> {
    if model.is_empty() {
        return Ok("\n".to_string());
    }

    let mut out = String::new();

    for (index, host) in model.hosts.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        write_block(&mut out, index, host)?;
    }

    Ok(out)
}

fn write_block(out: &mut String, index: usize, host: &HostBlock) -> Result<(), SerializeError> {
    validate_patterns(index, host)?;
    validate_comments(index, host)?;

    write_comments(out, host, 0, "");
    let _ = writeln!(out, "Host {}", host.pattern_string());

    for (position, param) in host.parameters.iter().enumerate() {
        write_comments(out, host, position + 1, INDENT);
        let line = render_parameter(index, &param.key, &param.value)?;
        let _ = writeln!(out, "{INDENT}{line}");
    }
    write_comments(out, host, host.line_count(), INDENT);

    Ok(())
}

fn write_comments(out: &mut String, host: &HostBlock, offset: usize, indent: &str) {
    for comment in host.comments.iter().filter(|c| c.offset == offset) {
        let _ = writeln!(out, "{indent}{}", comment.text);
    }
}

/// Render `key value`
///
/// A value containing whitespace or starting with `=` is quoted. When it
/// also carries a `"` it cannot be quoted, and a leading `=` is kept by
/// writing an explicit `=` separator instead.
fn render_parameter(index: usize, key: &str, value: &str) -> Result<String, SerializeError> {
    validate_key(index, key)?;

    if value.contains(['\n', '\r']) {
        return Err(SerializeError::violated(format!(
            "value of '{key}' in host block {index} contains a line break"
        )));
    }

    let line = if value.is_empty() {
        key.to_string()
    } else if (value.contains(char::is_whitespace) || value.starts_with('='))
        && !value.contains('"')
    {
        format!("{key} \"{value}\"")
    } else if value.starts_with('=') {
        format!("{key} ={value}")
    } else {
        format!("{key} {value}")
    };

    // The reader must hand back exactly this key and value
    let (read_key, read_args) = split_directive(&line);
    if read_key != key || unquote(read_args) != value {
        return Err(SerializeError::violated(format!(
            "value '{value}' of '{key}' in host block {index} cannot be written as ssh_config"
        )));
    }

    Ok(line)
}

fn validate_key(index: usize, key: &str) -> Result<(), SerializeError> {
    if key.is_empty() {
        return Err(SerializeError::violated(format!(
            "host block {index} has a parameter with an empty key"
        )));
    }
    if key.contains(|c: char| c.is_whitespace() || c == '=') || key.starts_with('#') {
        return Err(SerializeError::violated(format!(
            "parameter key '{key}' in host block {index} is not a valid keyword"
        )));
    }
    if key.eq_ignore_ascii_case("host") {
        return Err(SerializeError::violated(format!(
            "host block {index} has 'Host' as a parameter key"
        )));
    }
    Ok(())
}

fn validate_patterns(index: usize, host: &HostBlock) -> Result<(), SerializeError> {
    if host.patterns.is_empty() {
        return Err(SerializeError::violated(format!(
            "host block {index} has no patterns"
        )));
    }

    for pattern in &host.patterns {
        if pattern.is_empty() || pattern.contains(char::is_whitespace) {
            return Err(SerializeError::violated(format!(
                "pattern '{pattern}' in host block {index} is empty or contains whitespace"
            )));
        }
    }

    let line = format!("Host {}", host.pattern_string());
    let (_, args) = split_directive(&line);
    if !args.split_whitespace().eq(host.patterns.iter().map(String::as_str)) {
        return Err(SerializeError::violated(format!(
            "patterns of host block {index} cannot be written as ssh_config"
        )));
    }

    Ok(())
}

fn validate_comments(index: usize, host: &HostBlock) -> Result<(), SerializeError> {
    for comment in &host.comments {
        if comment.offset > host.line_count() {
            return Err(SerializeError::violated(format!(
                "comment offset {} in host block {index} is past the end of the block",
                comment.offset
            )));
        }
        if !comment.text.starts_with('#') || comment.text.contains(['\n', '\r']) {
            return Err(SerializeError::violated(format!(
                "comment '{}' in host block {index} is not a single '#' line",
                comment.text
            )));
        }
    }
    Ok(())
}
