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

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count
fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "sshconv=warn",
        1 => "sshconv=info",
        2 => "sshconv=debug",
        _ => "sshconv=trace",
    }
}

/// Create an environment filter based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the verbosity flag.
pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity_directive(verbosity))
    }
}

/// Initialize console logging
///
/// Logs go to stderr so converted output on stdout stays clean.
pub fn init_logging(verbosity: u8) {
    let filter = create_env_filter(verbosity);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        for (verbosity, expected) in [
            (0, "sshconv=warn"),
            (1, "sshconv=info"),
            (2, "sshconv=debug"),
            (3, "sshconv=trace"),
            (9, "sshconv=trace"),
        ] {
            assert_eq!(verbosity_directive(verbosity), expected);
            assert_eq!(EnvFilter::new(verbosity_directive(verbosity)).to_string(), expected);
        }
    }

    #[test]
    fn test_create_env_filter_without_rust_log() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(create_env_filter(0).to_string(), "sshconv=warn");
        assert_eq!(create_env_filter(2).to_string(), "sshconv=debug");
    }
}
