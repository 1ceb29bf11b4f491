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

//! Helper functions for ssh_config line handling

/// Split a trimmed directive line into its keyword and raw argument text
///
/// The keyword ends at the first whitespace or `=`. A single `=` between
/// keyword and value is consumed, with any whitespace around it, so
/// `Key=Value`, `Key = Value` and `Key Value` all yield `("Key", "Value")`.
pub fn split_directive(line: &str) -> (&str, &str) {
    let end = line
        .find(|c: char| c.is_whitespace() || c == '=')
        .unwrap_or(line.len());
    let keyword = &line[..end];

    let rest = line[end..].trim_start();
    let rest = rest.strip_prefix('=').unwrap_or(rest);

    (keyword, rest.trim())
}

/// Strip one pair of surrounding double quotes
///
/// Only a value that is entirely one quoted string is unquoted. Values with
/// embedded quotes (`ssh -o "A b" host`) are kept verbatim.
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        if !inner.contains('"') {
            return inner;
        }
    }
    value
}

/// Whether a line is a full-line comment
pub fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('#')
}
