// confscrub-core/src/scrubber.rs
//! The regex-backed `LineScrubber`.
//!
//! Every rule scans the pristine input line; one rule's matches never affect
//! what a later rule sees. Capture group 1 of each match is the value that
//! gets an identifier and is replaced.
//!
//! Patterns see the whole line, terminator included, so a pattern may consume
//! the `\n` (`hostname (\S+)\s`) and still have its group replaced. Rules are
//! compiled in multi-line CRLF mode, which keeps `$` matching at the end of the
//! line content. The one artefact of that mode, an empty match just past the
//! final `\n`, is dropped.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, error};

use crate::compiler::RuleSet;
use crate::engine::{LineScrubber, ScrubbedLine};
use crate::errors::ScrubError;
use crate::occurrence::{rebuild_line, MatchOccurrence};

#[derive(Debug)]
pub struct RegexScrubber {
    rule_set: RuleSet,
}

impl RegexScrubber {
    pub fn new(rule_set: RuleSet) -> Self {
        Self { rule_set }
    }

    /// Gives the rule set (and its identifier state) back.
    pub fn into_rules(self) -> RuleSet {
        self.rule_set
    }

    /// Finds every occurrence of every rule in `line`, assigning identifiers
    /// as values are seen. Occurrences come back in discovery order.
    pub fn find_occurrences(&mut self, line: &[u8], line_number: u64) -> Vec<MatchOccurrence> {
        let mut occurrences = Vec::new();
        let past_terminator = line.ends_with(b"\n").then_some(line.len());

        for (rule_index, rule) in self.rule_set.rules.iter_mut().enumerate() {
            for caps in rule.regex.captures_iter(line) {
                if let Some(whole) = caps.get(0) {
                    if whole.is_empty() && Some(whole.start()) == past_terminator {
                        continue;
                    }
                    debug!(
                        "Line {}: found match '{}'",
                        line_number,
                        String::from_utf8_lossy(whole.as_bytes())
                    );
                }

                let Some(group) = caps.get(1) else {
                    error!(
                        "{}",
                        ScrubError::MissingCaptureGroup {
                            pattern: rule.regex.as_str().to_string(),
                        }
                    );
                    continue;
                };

                let id = rule.state.assign(group.as_bytes());
                occurrences.push(MatchOccurrence {
                    start: group.start(),
                    end: group.end(),
                    rule_index,
                    id,
                    replacement: rule.template.render(id),
                });
                rule.replacements += 1;
            }
        }

        occurrences
    }
}

impl LineScrubber for RegexScrubber {
    fn scrub_line(&mut self, line: &[u8], line_number: u64) -> ScrubbedLine {
        let mut occurrences = self.find_occurrences(line, line_number);
        if occurrences.is_empty() {
            return ScrubbedLine::unchanged(line);
        }

        let text = rebuild_line(line, &mut occurrences);
        ScrubbedLine {
            text,
            replacements: occurrences.len(),
        }
    }

    fn rules(&self) -> &RuleSet {
        &self.rule_set
    }
}
