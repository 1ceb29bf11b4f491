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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::convert::{ConvertOptions, Format};

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/sshconv/config.yaml";

/// Settings file for the command line tool
///
/// ```yaml
/// preserve_comments: true
/// default_target: yaml
/// json_indent: 4
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub preserve_comments: bool,
    /// Target used when no `--to-*` flag is given
    pub default_target: Option<Format>,
    pub json_indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            preserve_comments: options.preserve_comments,
            default_target: None,
            json_indent: options.json_indent,
        }
    }
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        let expanded_path = expand_tilde(path);

        if !expanded_path.exists() {
            tracing::debug!(
                "Config file not found at {:?}, using defaults",
                expanded_path
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&expanded_path)
            .await
            .with_context(|| format!("Failed to read configuration file at {expanded_path:?}. Please check file permissions and ensure the file is accessible."))?;

        Self::from_yaml(&content).with_context(|| {
            format!("Failed to parse YAML configuration file at {expanded_path:?}")
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Library options derived from this file
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            preserve_comments: self.preserve_comments,
            json_indent: self.json_indent,
        }
    }
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
