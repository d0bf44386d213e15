//! Rule file parsing for `confscrub-core`.
//!
//! A rule file is line oriented:
//!
//! ```text
//! # comment
//! "(host-\d+)"      "HOST{0}"
//! "username (\S+)"  "user{0}"
//! ```
//!
//! Blank lines and lines whose first non-whitespace character is `#` are
//! ignored. Every other line must start with a double-quoted pattern followed
//! by a double-quoted replacement template; anything after the second quoted
//! string is ignored. Malformed lines are reported with their 1-based line
//! number and skipped.
//!
//! This module only splits lines into [`RuleDefinition`]s. Compiling patterns
//! and templates happens in [`crate::compiler`].
//!
//! License: MIT OR Apache-2.0

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::ScrubError;

/// Rule file used when none is given on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "config.txt";

lazy_static! {
    static ref RE_CONFIG_LINE: Regex =
        Regex::new(r#"^\s*"(.*)"\s*"(.*)""#).expect("rule line regex is valid");
}

/// One well-formed rule line, not yet compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    /// 1-based line number in the rule file.
    pub line_number: usize,
    /// The regular expression source, as written between the first pair of quotes.
    pub pattern: String,
    /// The replacement template source, as written between the second pair of quotes.
    pub replacement: String,
}

/// The parsed content of a rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    /// Rule definitions in file order.
    pub definitions: Vec<RuleDefinition>,
    /// Line numbers of lines that were neither blank, comments, nor rules.
    pub skipped_lines: Vec<usize>,
}

/// Classification of a single rule file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    Blank,
    Comment,
    Rule { pattern: String, replacement: String },
    Malformed,
}

/// Classifies one rule file line. A trailing line terminator is ignored.
pub fn parse_config_line(line: &str) -> ConfigLine {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();

    if trimmed.is_empty() {
        return ConfigLine::Blank;
    }
    if trimmed.starts_with('#') {
        return ConfigLine::Comment;
    }

    match RE_CONFIG_LINE.captures(line) {
        Some(caps) => ConfigLine::Rule {
            pattern: caps[1].to_string(),
            replacement: caps[2].to_string(),
        },
        None => ConfigLine::Malformed,
    }
}

impl RuleConfig {
    /// Loads rule definitions from a file on disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrubError> {
        let path = path.as_ref();
        info!("Using config file '{}'", path.display());
        let file = File::open(path).map_err(|source| ScrubError::ConfigOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses rule definitions from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ScrubError> {
        let mut config = RuleConfig::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            match parse_config_line(&line) {
                ConfigLine::Blank | ConfigLine::Comment => continue,
                ConfigLine::Rule { pattern, replacement } => {
                    debug!("Config line {}: pattern '{}' -> '{}'", line_number, pattern, replacement);
                    config.definitions.push(RuleDefinition {
                        line_number,
                        pattern,
                        replacement,
                    });
                }
                ConfigLine::Malformed => {
                    warn!("{}", ScrubError::ConfigSyntax { line: line_number });
                    config.skipped_lines.push(line_number);
                }
            }
        }

        debug!(
            "Read {} rule definitions ({} malformed lines skipped).",
            config.definitions.len(),
            config.skipped_lines.len()
        );
        Ok(config)
    }

    /// Parses rule definitions from an in-memory string.
    pub fn from_str_content(content: &str) -> Result<Self, ScrubError> {
        Self::from_reader(content.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
