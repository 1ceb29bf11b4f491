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

//! Core ssh_config reading
//!
//! Text is processed line by line. A `Host` line opens a new block, every
//! other directive is appended to the open block as an ordered key/value
//! pair. Indentation carries no meaning.

use crate::model::{Comment, HostBlock, SshConfigModel};
use crate::ssh_config::error::ParseError;

use super::helpers::{is_comment, split_directive, unquote};

/// Reader settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep full-line comments as positional metadata on each block
    pub preserve_comments: bool,
}

/// Parse ssh_config text, dropping comments
pub fn parse(content: &str) -> Result<SshConfigModel, ParseError> {
    parse_with_options(content, ParseOptions::default())
}

/// Parse ssh_config text
pub fn parse_with_options(
    content: &str,
    options: ParseOptions,
) -> Result<SshConfigModel, ParseError> {
    let mut hosts = Vec::new();
    let mut current: Option<HostBlock> = None;
    // Comments wait here until we know whether they belong to the open
    // block or to the next Host line.
    let mut pending_comments: Vec<String> = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        if is_comment(line) {
            if options.preserve_comments {
                pending_comments.push(line.to_string());
            }
            continue;
        }

        let (keyword, args) = split_directive(line);

        if keyword.is_empty() {
            return Err(ParseError::MissingKeyword { line: line_number });
        }

        // Exact keyword match: HostName, HostKeyAlias etc. are parameters
        if keyword.eq_ignore_ascii_case("host") {
            if let Some(block) = current.take() {
                hosts.push(block);
            }

            let patterns = parse_host_patterns(args, line_number)?;
            let mut block = HostBlock::new(patterns);
            block.comments.extend(
                pending_comments
                    .drain(..)
                    .map(|text| Comment::new(0, text)),
            );

            tracing::trace!(
                "Opened Host block '{}' at line {}",
                block.pattern_string(),
                line_number
            );
            current = Some(block);
            continue;
        }

        let Some(block) = current.as_mut() else {
            return Err(ParseError::DirectiveBeforeHost {
                line: line_number,
                keyword: keyword.to_string(),
            });
        };

        flush_comments(block, &mut pending_comments);
        block.push_param(keyword, unquote(args));
    }

    match current {
        Some(mut block) => {
            flush_comments(&mut block, &mut pending_comments);
            hosts.push(block);
        }
        None if !pending_comments.is_empty() => {
            tracing::debug!(
                "Dropping {} comment(s) from a config without Host blocks",
                pending_comments.len()
            );
        }
        None => {}
    }

    Ok(SshConfigModel::from_hosts(hosts))
}

/// Split the argument text of a `Host` line into patterns
pub(super) fn parse_host_patterns(
    args: &str,
    line_number: usize,
) -> Result<Vec<String>, ParseError> {
    let patterns: Vec<String> = args.split_whitespace().map(str::to_string).collect();

    if patterns.is_empty() {
        return Err(ParseError::MissingHostPattern { line: line_number });
    }

    Ok(patterns)
}

fn flush_comments(block: &mut HostBlock, pending: &mut Vec<String>) {
    let offset = block.line_count();
    block
        .comments
        .extend(pending.drain(..).map(|text| Comment::new(offset, text)));
}
