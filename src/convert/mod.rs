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

//! Conversion between ssh_config, YAML and JSON
//!
//! Every conversion goes through the canonical model, including
//! conversions where source and target format are the same, so the output
//! is always normalized.
//!
//! # Examples
//!
//! ```rust
//! use sshconv::{convert, Format};
//!
//! let yaml = convert("Host example.com\n    HostName example.com\n", Format::Yaml).unwrap();
//! assert!(yaml.contains("Host: example.com"));
//!
//! let ssh = convert(&yaml, Format::Ssh).unwrap();
//! assert_eq!(ssh, "Host example.com\n    HostName example.com\n");
//! ```

mod error;
mod format;

pub use error::ConversionError;
pub use format::Format;

use serde::Serialize;
use serde_json::Value;

use crate::codec::{self, CodecError};
use crate::detect;
use crate::model::SshConfigModel;
use crate::ssh_config::{self, ParseError, ParseOptions, SerializeError};

const DEFAULT_JSON_INDENT: usize = 2;

/// Conversion settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Carry full-line comments through the conversion
    pub preserve_comments: bool,
    /// Spaces per JSON indentation level; 0 writes compact JSON
    pub json_indent: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            preserve_comments: false,
            json_indent: DEFAULT_JSON_INDENT,
        }
    }
}

/// Stateless converter; a value can be shared freely between threads
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert `input` to `target`, detecting the source format when
    /// `source` is `None`
    pub fn convert(
        &self,
        input: &str,
        source: Option<Format>,
        target: Format,
    ) -> Result<String, ConversionError> {
        let source = source.unwrap_or_else(|| detect::detect(input));
        tracing::debug!("Converting {} -> {}", source, target);

        let model = self.read_model(input, source)?;
        tracing::debug!("Read {} host block(s)", model.len());

        self.write_model(&model, target)
    }

    /// Build the canonical model from text in `source` format
    pub fn read_model(
        &self,
        input: &str,
        source: Format,
    ) -> Result<SshConfigModel, ConversionError> {
        let mut model = match source {
            Format::Ssh => {
                let options = ParseOptions {
                    preserve_comments: self.options.preserve_comments,
                };
                ssh_config::parse_with_options(input, options)?
            }
            Format::Yaml | Format::Json if input.trim().is_empty() => SshConfigModel::new(),
            Format::Yaml => codec::from_tree(&serde_yaml::from_str::<Value>(input)?)?,
            Format::Json => codec::from_tree(&serde_json::from_str::<Value>(input)?)?,
        };

        if !self.options.preserve_comments {
            model.strip_comments();
        }
        Ok(model)
    }

    /// Render the canonical model as `target` text
    pub fn write_model(
        &self,
        model: &SshConfigModel,
        target: Format,
    ) -> Result<String, ConversionError> {
        let output = match target {
            Format::Ssh => ssh_config::serialize(model)?,
            Format::Yaml => serde_yaml::to_string(&codec::to_tree(model))?,
            Format::Json => to_json(&codec::to_tree(model), self.options.json_indent)?,
        };
        Ok(output)
    }
}

fn to_json(tree: &Value, indent: usize) -> Result<String, serde_json::Error> {
    let mut out = if indent == 0 {
        serde_json::to_string(tree)?
    } else {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        tree.serialize(&mut serializer)?;
        String::from_utf8_lossy(&buf).into_owned()
    };
    out.push('\n');
    Ok(out)
}

/// Classify text as ssh_config, YAML or JSON
pub fn detect_format(input: &str) -> Format {
    detect::detect(input)
}

/// Convert with format detection and default options
pub fn convert(input: &str, target: Format) -> Result<String, ConversionError> {
    Converter::default().convert(input, None, target)
}

/// Convert with an explicit source format (or detection) and options
pub fn convert_with(
    input: &str,
    source: Option<Format>,
    target: Format,
    options: ConvertOptions,
) -> Result<String, ConversionError> {
    Converter::new(options).convert(input, source, target)
}

/// Read ssh_config text into the canonical model
pub fn ssh_to_model(input: &str) -> Result<SshConfigModel, ParseError> {
    ssh_config::parse(input)
}

/// Write the canonical model as ssh_config text
pub fn model_to_ssh(model: &SshConfigModel) -> Result<String, SerializeError> {
    ssh_config::serialize(model)
}

/// Rebuild the canonical model from a YAML/JSON tree
pub fn tree_to_model(tree: &Value) -> Result<SshConfigModel, CodecError> {
    codec::from_tree(tree)
}

/// Build the YAML/JSON tree for the canonical model
pub fn model_to_tree(model: &SshConfigModel) -> Value {
    codec::to_tree(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HostBlock;

    #[test]
    fn test_ssh_to_yaml_single_host() {
        let input = "Host example.com\n    HostName example.com\n";
        assert_eq!(detect_format(input), Format::Ssh);

        let yaml = convert(input, Format::Yaml).unwrap();
        let tree: Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            tree,
            serde_json::json!([{ "Host": "example.com", "params": [["HostName", "example.com"]] }])
        );
    }

    #[test]
    fn test_repeated_identity_files_survive_yaml() {
        let input = "Host gh\n  IdentityFile ~/.ssh/a\n  IdentityFile ~/.ssh/b\n";
        let yaml = convert(input, Format::Yaml).unwrap();
        let tree: Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(
            tree[0]["params"],
            serde_json::json!([["IdentityFile", "~/.ssh/a"], ["IdentityFile", "~/.ssh/b"]])
        );
    }

    #[test]
    fn test_json_entry_to_ssh() {
        let ssh = convert("[{\"Host\":\"a\",\"params\":[]}]", Format::Ssh).unwrap();
        assert_eq!(ssh, "Host a\n");
    }

    #[test]
    fn test_directive_before_host_fails_whole_conversion() {
        let err = convert("User root\nHost a\n", Format::Yaml).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::Parse(ParseError::DirectiveBeforeHost { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input_to_yaml_is_empty_sequence() {
        assert_eq!(detect_format(""), Format::Ssh);
        assert_eq!(convert("", Format::Yaml).unwrap().trim(), "[]");
        assert_eq!(convert("", Format::Json).unwrap(), "[]\n");
        assert_eq!(convert("", Format::Ssh).unwrap(), "\n");
    }

    #[test]
    fn test_same_format_still_normalizes() {
        let input = "host a\nuser=u\n\n\n\nHost b\n";
        let output = convert_with(input, Some(Format::Ssh), Format::Ssh, ConvertOptions::default())
            .unwrap();
        assert_eq!(output, "Host a\n    user u\n\nHost b\n");
    }

    #[test]
    fn test_explicit_source_overrides_detection() {
        // Detection would say JSON; forcing YAML still works since JSON is YAML
        let output = convert_with(
            "[{\"Host\": \"a\"}]",
            Some(Format::Yaml),
            Format::Ssh,
            ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(output, "Host a\n");
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = convert("[{\"Host\": ", Format::Ssh).unwrap_err();
        assert!(matches!(err, ConversionError::Json(_)));
    }

    #[test]
    fn test_codec_errors_are_reported() {
        let err = convert("[{\"params\": []}]", Format::Ssh).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::Codec(CodecError::MissingHost { index: 0 })
        ));
    }

    #[test]
    fn test_json_indent_option() {
        let input = "Host a\n";
        let compact = convert_with(
            input,
            None,
            Format::Json,
            ConvertOptions {
                json_indent: 0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(compact, "[{\"Host\":\"a\",\"params\":[]}]\n");

        let pretty = convert(input, Format::Json).unwrap();
        assert_eq!(
            pretty,
            "[\n  {\n    \"Host\": \"a\",\n    \"params\": []\n  }\n]\n"
        );
    }

    #[test]
    fn test_comments_follow_option() {
        let input = "# top\nHost a\n    # inner\n    User u\n";

        let dropped = convert(input, Format::Json).unwrap();
        assert!(!dropped.contains("comments"));

        let options = ConvertOptions {
            preserve_comments: true,
            ..Default::default()
        };
        let kept = convert_with(input, None, Format::Yaml, options).unwrap();
        assert!(kept.contains("# inner"));

        let back = convert_with(&kept, None, Format::Ssh, options).unwrap();
        assert_eq!(back, "# top\nHost a\n    # inner\n    User u\n");

        // Comments in a tree are dropped unless retention is on
        let stripped = convert(&kept, Format::Ssh).unwrap();
        assert_eq!(stripped, "Host a\n    User u\n");
    }

    #[test]
    fn test_primitives_round_trip() {
        let model = ssh_to_model("Host a b\n  Port 22\n").unwrap();
        assert_eq!(tree_to_model(&model_to_tree(&model)).unwrap(), model);
        assert_eq!(model_to_ssh(&model).unwrap(), "Host a b\n    Port 22\n");
    }

    #[test]
    fn test_serialize_error_surfaces() {
        let err = Converter::default()
            .write_model(
                &SshConfigModel::from_hosts(vec![HostBlock::default()]),
                Format::Ssh,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ConversionError::Serialize(SerializeError::InvariantViolated { .. })
        ));
    }

    #[test]
    fn test_ssh_yaml_ssh_is_idempotent() {
        let input = r#"
Host bastion
    HostName 203.0.113.10
    User ops
    IdentityFile ~/.ssh/a
    IdentityFile ~/.ssh/b
    ProxyCommand ssh -W %h:%p gateway

Host *
    ServerAliveInterval 60
"#;
        let first_yaml = convert(input, Format::Yaml).unwrap();
        let first_ssh = convert(&first_yaml, Format::Ssh).unwrap();
        let second_yaml = convert(&first_ssh, Format::Yaml).unwrap();
        let second_ssh = convert(&second_yaml, Format::Ssh).unwrap();

        assert_eq!(first_ssh, second_ssh);
        assert_eq!(first_yaml, second_yaml);
    }
}
