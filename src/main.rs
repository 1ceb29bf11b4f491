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
use clap::Parser;

use sshconv::{
    cli::Cli,
    config::{expand_tilde, Config},
    convert::{Converter, Format},
    utils::{
        default_source, init_logging, is_stdin_piped, read_source, read_stdin, scan_directory,
        write_output,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load(&cli.config).await?;

    let Some(target) = cli.target().or(config.default_target) else {
        eprintln!("Please specify either --to-yaml or --to-ssh or --to-json");
        std::process::exit(1);
    };

    let mut options = config.convert_options();
    options.preserve_comments |= cli.preserve_comments;
    let converter = Converter::new(options);

    let piped = is_stdin_piped();

    let output = if piped {
        tracing::debug!("Reading input from stdin");
        let input = read_stdin().await?;
        converter
            .convert(&input, cli.from, target)
            .context("Failed to convert standard input")?
    } else {
        let src = match &cli.src {
            Some(path) => expand_tilde(path),
            None => default_source()
                .context("Cannot determine the home directory; pass --src explicitly")?,
        };

        if src.is_dir() {
            if cli.from.is_some_and(|f| f != Format::Ssh) {
                tracing::warn!("--from is ignored when scanning a directory of ssh_config files");
            }
            let model = scan_directory(&src, &converter).await?;
            converter.write_model(&model, target)?
        } else {
            let input = read_source(&src).await?;
            converter
                .convert(&input, cli.from, target)
                .with_context(|| format!("Failed to convert {}", src.display()))?
        }
    };

    // Piped input always goes back out through stdout
    let dest = if piped {
        None
    } else {
        cli.dest.as_deref().map(expand_tilde)
    };

    write_output(&output, dest.as_deref()).await
}
