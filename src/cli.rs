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

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::convert::Format;

#[derive(Parser, Debug)]
#[command(
    name = "sshconv",
    version,
    about = "Convert SSH client configuration between ssh_config, YAML and JSON",
    long_about = "sshconv reads OpenSSH client configuration (ssh_config), YAML or JSON and writes it back out in any of\nthe three formats. Host blocks, parameter order and repeated directives such as IdentityFile are kept\nexactly; the YAML/JSON form is a sequence of {Host, params} entries with params as [key, value] pairs.",
    after_help = "EXAMPLES:\n  Convert ~/.ssh/config to YAML:     sshconv --to-yaml\n  Convert a file to JSON:            sshconv --to-json --src ./ssh_config\n  Convert YAML back to ssh_config:   sshconv --to-ssh --src hosts.yaml --dest ~/.ssh/config\n  Use a pipe:                        cat ~/.ssh/config | sshconv --to-json\n  Scan a directory of configs:       sshconv --to-yaml --src ~/.ssh/config.d"
)]
#[command(group(
    ArgGroup::new("target")
        .args(["to_yaml", "to_ssh", "to_json"])
        .multiple(false)
))]
pub struct Cli {
    #[arg(long, help = "Convert the input (ssh_config or JSON) to YAML")]
    pub to_yaml: bool,

    #[arg(long, help = "Convert the input (YAML or JSON) to ssh_config")]
    pub to_ssh: bool,

    #[arg(long, help = "Convert the input (ssh_config or YAML) to JSON")]
    pub to_json: bool,

    #[arg(
        long,
        value_name = "FORMAT",
        help = "Input format (ssh, yaml, json); detected from the content when omitted"
    )]
    pub from: Option<Format>,

    #[arg(
        long,
        help = "Source file or directory, used when input is not piped [default: ~/.ssh/config]\nDirectories are scanned for ssh_config files; key files are skipped"
    )]
    pub src: Option<PathBuf>,

    #[arg(
        long,
        help = "Destination file, used when input is not piped [default: stdout]\nParent directories are created"
    )]
    pub dest: Option<PathBuf>,

    #[arg(long, help = "Keep full-line comments in the converted output")]
    pub preserve_comments: bool,

    #[arg(
        long,
        default_value = DEFAULT_CONFIG_PATH,
        help = "Settings file path [default: ~/.config/sshconv/config.yaml]"
    )]
    pub config: PathBuf,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,
}

impl Cli {
    /// Target format chosen by the `--to-*` flags
    pub fn target(&self) -> Option<Format> {
        if self.to_yaml {
            Some(Format::Yaml)
        } else if self.to_ssh {
            Some(Format::Ssh)
        } else if self.to_json {
            Some(Format::Json)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_flags() {
        let cli = Cli::try_parse_from(["sshconv", "--to-yaml"]).unwrap();
        assert_eq!(cli.target(), Some(Format::Yaml));

        let cli = Cli::try_parse_from(["sshconv", "--to-ssh", "--src", "hosts.yaml"]).unwrap();
        assert_eq!(cli.target(), Some(Format::Ssh));
        assert_eq!(cli.src, Some(PathBuf::from("hosts.yaml")));

        let cli = Cli::try_parse_from(["sshconv"]).unwrap();
        assert_eq!(cli.target(), None);
    }

    #[test]
    fn test_target_flags_are_exclusive() {
        assert!(Cli::try_parse_from(["sshconv", "--to-yaml", "--to-json"]).is_err());
    }

    #[test]
    fn test_from_format() {
        let cli = Cli::try_parse_from(["sshconv", "--to-ssh", "--from", "yml"]).unwrap();
        assert_eq!(cli.from, Some(Format::Yaml));

        assert!(Cli::try_parse_from(["sshconv", "--to-ssh", "--from", "toml"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sshconv", "--to-json", "-vv"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.preserve_comments);
        assert!(cli.dest.is_none());
    }
}
