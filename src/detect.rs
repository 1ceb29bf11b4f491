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

//! Input format detection
//!
//! Detection is an ordered rule chain over the raw text, first match wins:
//!
//! 1. Text starting with `{` or `[` is JSON.
//! 2. Any line that starts with a `Host` directive and is not a YAML
//!    mapping key is ssh_config.
//! 3. Any unindented `key:` line (optionally a `- key:` sequence item) that
//!    does not start with a `Host` token is YAML.
//! 4. Everything else, including empty text, is ssh_config.
//!
//! Nothing is parsed here; the result depends on the input text alone.

use crate::convert::Format;

/// Classify `content` as ssh_config, YAML or JSON
pub fn detect(content: &str) -> Format {
    let trimmed = content.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        tracing::debug!("Detected JSON: text opens with a bracket");
        return Format::Json;
    }

    if has_host_directive(trimmed) {
        tracing::debug!("Detected ssh_config: found a Host directive");
        return Format::Ssh;
    }

    if trimmed.lines().any(is_top_level_yaml_key) {
        tracing::debug!("Detected YAML: found a top-level mapping key");
        return Format::Yaml;
    }

    tracing::debug!("No format markers found, assuming ssh_config");
    Format::Ssh
}

/// Whether any line of `content` is a `Host` directive
pub fn has_host_directive(content: &str) -> bool {
    content.lines().any(is_host_directive)
}

/// `Host <patterns>` or `Host=<patterns>` at any indentation
fn is_host_directive(line: &str) -> bool {
    let line = line.trim();
    starts_with_host_keyword(line) && !looks_like_mapping_key(line)
}

fn is_top_level_yaml_key(line: &str) -> bool {
    if line.starts_with(char::is_whitespace) || line.starts_with('#') {
        return false;
    }
    let item = strip_sequence_marker(line);
    looks_like_mapping_key(item) && !starts_with_host_keyword(item)
}

fn starts_with_host_keyword(line: &str) -> bool {
    let Some(keyword) = line.get(..4) else {
        return false;
    };
    keyword.eq_ignore_ascii_case("host")
        && line[4..]
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '=')
}

fn strip_sequence_marker(line: &str) -> &str {
    match line.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

/// A colon outside quotes followed by whitespace or end of line, with a
/// non-empty key in front of it
fn looks_like_mapping_key(line: &str) -> bool {
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = line.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double && (pos == 0 || preceded_by_space(line, pos)) => {
                return false;
            }
            ':' if !in_single && !in_double => {
                let ends_key = chars.peek().is_none_or(|(_, next)| next.is_whitespace());
                if ends_key && !line[..pos].trim().is_empty() {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

fn preceded_by_space(line: &str, pos: usize) -> bool {
    line[..pos].ends_with(char::is_whitespace)
}
