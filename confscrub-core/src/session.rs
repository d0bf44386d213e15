// confscrub-core/src/session.rs
//! The session driver: streams a source through a `LineScrubber`.
//!
//! Lines are read one at a time as raw bytes (terminator included), scrubbed,
//! written and flushed before the next line is read, so memory use does not
//! grow with the size of the source. Bytes that are not valid UTF-8 pass
//! through like any others. Identifier state lives in the scrubber and
//! persists for the whole session.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};

use crate::compiler::RuleSet;
use crate::engine::LineScrubber;
use crate::errors::ScrubError;
use crate::scrubber::RegexScrubber;

/// Totals for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrubSummary {
    /// Replacements applied across all lines and rules.
    pub replacements: u64,
    /// Lines read from the source.
    pub lines_read: u64,
    /// Lines whose output differs from the input.
    pub lines_changed: u64,
}

impl ScrubSummary {
    /// Folds one line's replacement count into the totals.
    pub fn record_line(&mut self, replacements: usize) {
        self.lines_read += 1;
        if replacements > 0 {
            self.lines_changed += 1;
            self.replacements += replacements as u64;
        }
    }
}

impl fmt::Display for ScrubSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} replacement{} done",
            self.replacements,
            if self.replacements == 1 { "" } else { "s" }
        )
    }
}

/// Scrubs every line of `reader` into `writer`.
///
/// Each output line is flushed as soon as it is written. On a read or write
/// error the lines already written stay written.
pub fn scrub_stream<S, R, W>(scrubber: &mut S, mut reader: R, writer: &mut W) -> Result<ScrubSummary, ScrubError>
where
    S: LineScrubber + ?Sized,
    R: BufRead,
    W: Write + ?Sized,
{
    debug!("Starting scrub session with {} rules.", scrubber.rules().len());

    let mut summary = ScrubSummary::default();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        let scrubbed = scrubber.scrub_line(&line, summary.lines_read + 1);
        writer.write_all(&scrubbed.text)?;
        writer.flush()?;
        summary.record_line(scrubbed.replacements);
    }

    info!("{}", summary);
    Ok(summary)
}

/// One-shot convenience wrapper: scrubs an in-memory string with a rule set.
///
/// Returns the scrubbed text, the summary, and the rule set with its updated
/// identifier state.
pub fn scrub_string(rule_set: RuleSet, content: &str) -> Result<(String, ScrubSummary, RuleSet), ScrubError> {
    let mut scrubber = RegexScrubber::new(rule_set);
    let mut out = Vec::with_capacity(content.len());
    let summary = scrub_stream(&mut scrubber, content.as_bytes(), &mut out)?;
    let text = String::from_utf8(out).map_err(|e| {
        ScrubError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    Ok((text, summary, scrubber.into_rules()))
}
