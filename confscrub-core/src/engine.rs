// confscrub-core/src/engine.rs
//! Defines the `LineScrubber` trait used by the session driver.
//!
//! The driver only needs "rewrite this line and tell me how many replacements
//! you made". Keeping that behind a trait lets the session loop be tested
//! with stub scrubbers and keeps the regex engine free of I/O.
//!
//! License: MIT OR APACHE 2.0

use crate::compiler::RuleSet;

/// Result of scrubbing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubbedLine {
    /// The output line, including the input's terminator if it had one.
    pub text: Vec<u8>,
    /// Number of replacements applied to this line.
    pub replacements: usize,
}

impl ScrubbedLine {
    /// A line that passes through untouched.
    pub fn unchanged(line: &[u8]) -> Self {
        Self {
            text: line.to_vec(),
            replacements: 0,
        }
    }
}

/// A stateful, line-at-a-time rewriter.
pub trait LineScrubber {
    /// Rewrites one line. `line_number` is 1-based and only used for diagnostics.
    ///
    /// `line` is raw bytes with its terminator attached; it need not be UTF-8.
    /// Implementations may update internal state (identifier assignments) that
    /// carries over to later lines.
    fn scrub_line(&mut self, line: &[u8], line_number: u64) -> ScrubbedLine;

    /// The rules driving this scrubber, with their current state.
    fn rules(&self) -> &RuleSet;
}
