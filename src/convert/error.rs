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

//! Error type for a whole conversion

use thiserror::Error;

use crate::codec::CodecError;
use crate::ssh_config::{ParseError, SerializeError};

/// Any failure of a conversion call
///
/// A failed conversion never produces partial output. Wrapped component
/// errors are exposed through `source()` rather than repeated in the
/// message.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Format name is not ssh, yaml or json
    #[error("unsupported format '{0}' (expected ssh, yaml or json)")]
    UnsupportedFormat(String),

    /// Input format could not be decided
    ///
    /// Reserved: the current detector always resolves to a format.
    #[error("unable to determine the input format")]
    DetectionAmbiguous,

    #[error("invalid ssh_config")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error("invalid host tree")]
    Codec(#[from] CodecError),

    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML")]
    Yaml(#[from] serde_yaml::Error),
}
