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

//! OpenSSH client configuration text
//!
//! This module reads `ssh_config` text into the canonical
//! [`SshConfigModel`](crate::model::SshConfigModel) and writes it back out.
//! It is a structural transcoder: directives are not validated against the
//! set OpenSSH understands.

mod error;
mod parser;
mod writer;

pub use error::{ParseError, SerializeError};
pub use parser::{parse, parse_with_options, ParseOptions};
pub use writer::serialize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_reproduces_model() {
        let config_content = r#"
Host web*.example.com  web
  User webuser
  IdentityFile=~/.ssh/web
  IdentityFile "~/.ssh/old key"
  ProxyCommand ssh -W %h:%p bastion

host db
    Port 5432
"#;

        let first = parse(config_content).unwrap();
        let text = serialize(&first).unwrap();
        let second = parse(&text).unwrap();

        assert_eq!(first, second);
        assert_eq!(serialize(&second).unwrap(), text);
    }

    #[test]
    fn test_round_trip_with_comments() {
        let config_content = r#"
# personal
Host home
    # old box
    HostName 192.168.1.10

# work
Host work
    User me
    # done
"#;
        let options = ParseOptions {
            preserve_comments: true,
        };
        let first = parse_with_options(config_content, options).unwrap();
        let text = serialize(&first).unwrap();

        assert!(text.starts_with("# personal\nHost home\n    # old box\n"));
        assert_eq!(parse_with_options(&text, options).unwrap(), first);
    }
}
