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

//! Canonical in-memory model shared by every converter
//!
//! The model is an ordered list of [`HostBlock`]s. Each block keeps its
//! parameters as an ordered list of key/value pairs rather than a map, so
//! repeated directives such as `IdentityFile` survive every round trip and
//! first-match-wins ordering is never disturbed.

use std::fmt;

/// A parsed SSH client configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SshConfigModel {
    pub hosts: Vec<HostBlock>,
}

impl SshConfigModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_hosts(hosts: Vec<HostBlock>) -> Self {
        Self { hosts }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostBlock> {
        self.hosts.iter()
    }

    /// Append every block of `other`, keeping both orders intact
    pub fn extend(&mut self, other: SshConfigModel) {
        self.hosts.extend(other.hosts);
    }

    /// Drop retained comments from every block
    pub fn strip_comments(&mut self) {
        for host in &mut self.hosts {
            host.comments.clear();
        }
    }
}

impl<'a> IntoIterator for &'a SshConfigModel {
    type Item = &'a HostBlock;
    type IntoIter = std::slice::Iter<'a, HostBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}

/// One `Host` directive and the parameters that follow it
///
/// Blocks are never merged: two `Host` lines with identical patterns produce
/// two blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostBlock {
    /// Patterns listed on the `Host` line, in source order
    pub patterns: Vec<String>,
    /// Directives in source order; keys may repeat
    pub parameters: Vec<Parameter>,
    /// Full-line comments, only populated when comment retention is enabled
    ///
    /// Readers keep these in ascending offset order. Writers accept any
    /// order and emit them by offset.
    pub comments: Vec<Comment>,
}

impl HostBlock {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            parameters: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Builder-style helper used heavily in tests
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_param(key, value);
        self
    }

    pub fn push_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.push(Parameter::new(key, value));
    }

    /// Patterns joined the way they appear on a `Host` line
    pub fn pattern_string(&self) -> String {
        self.patterns.join(" ")
    }

    /// First value for `key`, matched case-insensitively
    pub fn get(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.is(key))
            .map(|p| p.value.as_str())
    }

    /// Every value for `key` in source order, matched case-insensitively
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.parameters
            .iter()
            .filter(move |p| p.is(key))
            .map(|p| p.value.as_str())
    }

    /// Number of lines this block renders to, excluding comments
    pub(crate) fn line_count(&self) -> usize {
        1 + self.parameters.len()
    }
}

impl fmt::Display for HostBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Host {}", self.pattern_string())?;
        if let Some(hostname) = self.get("HostName") {
            write!(f, " ({hostname})")?;
        }
        write!(f, " [{} parameters]", self.parameters.len())
    }
}

/// A single `key value` directive
///
/// The key keeps its original casing so output matches what the user wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive keyword match
    pub fn is(&self, keyword: &str) -> bool {
        self.key.eq_ignore_ascii_case(keyword)
    }
}

/// A retained full-line comment
///
/// `offset` is the number of block lines (the `Host` line plus parameter
/// lines) that precede the comment. Offset 0 sits above the `Host` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub offset: usize,
    /// Trimmed comment text including the leading `#`
    pub text: String,
}

impl Comment {
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive_and_first_wins() {
        let host = HostBlock::new(["example.com"])
            .with_param("HostName", "10.0.0.1")
            .with_param("hostname", "10.0.0.2");

        assert_eq!(host.get("HOSTNAME"), Some("10.0.0.1"));
        assert_eq!(host.get("User"), None);
    }

    #[test]
    fn test_get_all_preserves_repeats() {
        let host = HostBlock::new(["*"])
            .with_param("IdentityFile", "~/.ssh/id_ed25519")
            .with_param("User", "deploy")
            .with_param("identityfile", "~/.ssh/id_rsa");

        let files: Vec<&str> = host.get_all("IdentityFile").collect();
        assert_eq!(files, vec!["~/.ssh/id_ed25519", "~/.ssh/id_rsa"]);
        // Original casing is kept on the stored key
        assert_eq!(host.parameters[2].key, "identityfile");
    }

    #[test]
    fn test_pattern_string_and_display() {
        let host = HostBlock::new(["*.example.com", "bastion"]).with_param("HostName", "b.local");
        assert_eq!(host.pattern_string(), "*.example.com bastion");
        assert_eq!(
            host.to_string(),
            "Host *.example.com bastion (b.local) [1 parameters]"
        );
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut first = SshConfigModel::from_hosts(vec![HostBlock::new(["a"])]);
        let second = SshConfigModel::from_hosts(vec![HostBlock::new(["b"]), HostBlock::new(["a"])]);
        first.extend(second);

        let patterns: Vec<String> = first.iter().map(HostBlock::pattern_string).collect();
        assert_eq!(patterns, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_strip_comments() {
        let mut host = HostBlock::new(["a"]);
        host.comments.push(Comment::new(0, "# top"));
        let mut model = SshConfigModel::from_hosts(vec![host]);
        model.strip_comments();
        assert!(model.hosts[0].comments.is_empty());
    }
}
