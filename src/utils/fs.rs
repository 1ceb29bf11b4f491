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

//! Input and output plumbing for the command line tool

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::convert::{Converter, Format};
use crate::detect::has_host_directive;
use crate::model::SshConfigModel;

/// File names under ~/.ssh that are never ssh_config files
static SKIPPED_FILE_NAMES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:.*\.pub|id_.*|.*\.pem|.*\.key|known_hosts.*|authorized_keys.*)$")
        .expect("skip pattern is valid")
});

/// Whether input arrives through a pipe rather than a terminal
pub fn is_stdin_piped() -> bool {
    !atty::is(atty::Stream::Stdin)
}

/// `~/.ssh/config`, if a home directory is known
pub fn default_source() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("config"))
}

pub async fn read_stdin() -> Result<String> {
    let mut content = String::new();
    tokio::io::stdin()
        .read_to_string(&mut content)
        .await
        .context("Failed to read from standard input")?;
    Ok(content)
}

pub async fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("Source file not found: {}", path.display());
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read source file: {}", path.display()))
}

/// Whether a directory scan should leave this file alone
pub fn is_skipped_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_none_or(|name| SKIPPED_FILE_NAMES.is_match(name))
}

/// Recursively collect regular files under `dir`, sorted by path
pub fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;

        if metadata.is_file() {
            files.push(path);
        } else if metadata.is_dir() {
            files.extend(walk_directory(&path)?);
        }
        // Skip symlinks and other special files
    }

    files.sort();
    Ok(files)
}

/// Read every ssh_config file under `dir` into one model
///
/// Key material and non-UTF-8 files are skipped, as are files without a
/// `Host` directive (`allowed_signers`, `environment`, `rc` and the like).
/// A file with a `Host` directive that fails to parse fails the whole scan.
pub async fn scan_directory(dir: &Path, converter: &Converter) -> Result<SshConfigModel> {
    let mut model = SshConfigModel::new();

    for path in walk_directory(dir)? {
        if is_skipped_file(&path) {
            tracing::debug!("Skipping key or known-hosts file {}", path.display());
            continue;
        }

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Skipping unreadable file {}: {}", path.display(), e);
                continue;
            }
        };
        let Ok(content) = String::from_utf8(bytes) else {
            tracing::debug!("Skipping non-UTF-8 file {}", path.display());
            continue;
        };

        if !has_host_directive(&content) {
            tracing::debug!("Skipping {}: not ssh_config", path.display());
            continue;
        }

        let found = converter
            .read_model(&content, Format::Ssh)
            .with_context(|| format!("Failed to parse SSH config file: {}", path.display()))?;
        tracing::debug!(
            "Read {} host block(s) from {}",
            found.len(),
            path.display()
        );
        model.extend(found);
    }

    Ok(model)
}

/// Write converted text to `dest`, or to stdout when `dest` is `None`
pub async fn write_output(content: &str, dest: Option<&Path>) -> Result<()> {
    let Some(dest) = dest else {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(content.as_bytes())
            .await
            .context("Failed to write to standard output")?;
        stdout.flush().await?;
        return Ok(());
    };

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::write(dest, content)
        .await
        .with_context(|| format!("Failed to write destination file: {}", dest.display()))?;

    println!("File has been saved successfully");
    println!("File path: {}", dest.display());
    Ok(())
}
