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

//! Error types for reading and writing ssh_config text

use thiserror::Error;

/// Errors raised while reading ssh_config text
///
/// Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A directive appears before the first `Host` line
    #[error("directive '{keyword}' at line {line} appears before any Host directive")]
    DirectiveBeforeHost { line: usize, keyword: String },

    /// `Host` with nothing after it
    #[error("Host directive requires at least one pattern at line {line}")]
    MissingHostPattern { line: usize },

    /// A directive line with an empty keyword (e.g. `=value`)
    #[error("missing directive keyword at line {line}")]
    MissingKeyword { line: usize },
}

/// Errors raised while writing ssh_config text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializeError {
    /// The model cannot be represented as valid ssh_config text
    #[error("cannot serialize model: {reason}")]
    InvariantViolated { reason: String },
}

impl SerializeError {
    pub(crate) fn violated(reason: impl Into<String>) -> Self {
        Self::InvariantViolated {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::DirectiveBeforeHost {
            line: 1,
            keyword: "User".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "directive 'User' at line 1 appears before any Host directive"
        );

        let err = ParseError::MissingHostPattern { line: 7 };
        assert_eq!(
            err.to_string(),
            "Host directive requires at least one pattern at line 7"
        );

        let err = SerializeError::violated("host block 0 has no patterns");
        assert_eq!(
            err.to_string(),
            "cannot serialize model: host block 0 has no patterns"
        );
    }
}
