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

//! Error types for the structured tree codec

use thiserror::Error;

/// Errors raised when a YAML/JSON tree does not have the documented shape
///
/// `index` is the 0-based position of the host entry in the top-level
/// sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Entry has no usable `Host` field
    #[error("host entry {index} is missing a 'Host' field with at least one pattern")]
    MissingHost { index: usize },

    /// A parameter is not a `[key, value]` pair of scalars
    #[error("host entry {index} has a malformed parameter: {detail}")]
    MalformedParameter { index: usize, detail: String },

    /// A comment is not an `{offset, text}` mapping that fits the entry
    #[error("host entry {index} has a malformed comment: {detail}")]
    MalformedComment { index: usize, detail: String },

    /// The document root is neither a sequence of host entries nor a
    /// recognised wrapper around one
    #[error("expected a sequence of host entries, found {found}")]
    UnexpectedShape { found: &'static str },
}
