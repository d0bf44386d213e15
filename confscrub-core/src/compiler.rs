//! compiler.rs - Turns rule definitions into a runnable `RuleSet`.
//!
//! Each [`RuleDefinition`] becomes a [`Rule`]: a compiled regular expression,
//! a parsed [`ReplacementTemplate`] and the identifier state that the line
//! scrubber mutates for the rest of the session. Definitions whose pattern or
//! template does not compile are warned about and skipped, like malformed
//! lines in the rule file.
//!
//! Patterns are byte regexes so source lines need not be valid UTF-8. They
//! are built in multi-line CRLF mode: lines are matched with their terminator
//! attached, and `$` must still match right before a trailing `\n` or `\r\n`.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use regex::bytes::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::path::Path;

use crate::config::{RuleConfig, RuleDefinition};
use crate::errors::ScrubError;
use crate::template::ReplacementTemplate;

/// Identifier assignment state for a single rule.
///
/// `next_id` always equals the number of distinct values in `seen`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierState {
    next_id: u64,
    seen: HashMap<Vec<u8>, u64>,
}

impl IdentifierState {
    /// Returns the identifier for `value`, assigning the next one on first sight.
    pub fn assign(&mut self, value: &[u8]) -> u64 {
        if let Some(&id) = self.seen.get(value) {
            return id;
        }
        self.next_id += 1;
        self.seen.insert(value.to_vec(), self.next_id);
        self.next_id
    }

    /// Identifier previously assigned to `value`, if any.
    pub fn get(&self, value: &[u8]) -> Option<u64> {
        self.seen.get(value).copied()
    }

    /// Number of distinct values seen so far.
    pub fn distinct_values(&self) -> u64 {
        self.next_id
    }

    /// Captured values paired with their identifiers, in identifier order.
    pub fn assignments(&self) -> Vec<(&[u8], u64)> {
        let mut pairs: Vec<(&[u8], u64)> = self.seen.iter().map(|(k, v)| (k.as_slice(), *v)).collect();
        pairs.sort_by_key(|&(_, id)| id);
        pairs
    }
}

/// A compiled rule with its session-long identifier state.
#[derive(Debug)]
pub struct Rule {
    /// The compiled pattern. Capture group 1 is the value to replace.
    pub regex: Regex,
    /// Template rendered with the identifier of each captured value.
    pub template: ReplacementTemplate,
    /// 1-based line of the rule file this rule came from.
    pub line_number: usize,
    /// Per-rule identifier state.
    pub state: IdentifierState,
    /// Replacements performed by this rule so far.
    pub replacements: u64,
}

impl Rule {
    /// The pattern as written in the rule file.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// The ordered set of rules for a session, in rule file order.
#[derive(Debug, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Reads, parses and compiles a rule file.
    ///
    /// Fails with [`ScrubError::NoPatternsLoaded`] if nothing usable remains.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrubError> {
        let config = RuleConfig::load_from_file(path)?;
        let rule_set = compile_rules(&config);
        if rule_set.is_empty() {
            return Err(ScrubError::NoPatternsLoaded);
        }
        info!("Loaded {} patterns", rule_set.len());
        Ok(rule_set)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

/// Compiles a single definition.
pub fn compile_rule(definition: &RuleDefinition) -> Result<Rule, ScrubError> {
    let regex = RegexBuilder::new(&definition.pattern)
        .multi_line(true)
        .crlf(true)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|source| ScrubError::InvalidPattern {
            line: definition.line_number,
            source,
        })?;

    let template = ReplacementTemplate::parse(&definition.replacement).map_err(|reason| {
        ScrubError::InvalidTemplate {
            line: definition.line_number,
            reason,
        }
    })?;

    if regex.captures_len() < 2 {
        debug!(
            "Pattern '{}' from config line {} has no capture group; its matches will be skipped.",
            definition.pattern, definition.line_number
        );
    }

    Ok(Rule {
        regex,
        template,
        line_number: definition.line_number,
        state: IdentifierState::default(),
        replacements: 0,
    })
}

/// Compiles every definition in order, skipping (and warning about) the ones
/// that fail. The result may be empty; callers decide whether that is fatal.
pub fn compile_rules(config: &RuleConfig) -> RuleSet {
    debug!("Starting compilation of {} rules.", config.definitions.len());

    let mut rules = Vec::with_capacity(config.definitions.len());
    for definition in &config.definitions {
        match compile_rule(definition) {
            Ok(rule) => rules.push(rule),
            Err(e) => warn!("{}, ignoring", e),
        }
    }

    debug!("Finished compiling rules. Total compiled: {}.", rules.len());
    RuleSet { rules }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(line_number: usize, pattern: &str, replacement: &str) -> RuleDefinition {
        RuleDefinition {
            line_number,
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_identifier_state_first_seen_order() {
        let mut state = IdentifierState::default();
        assert_eq!(state.assign(b"42"), 1);
        assert_eq!(state.assign(b"7"), 2);
        assert_eq!(state.assign(b"42"), 1);
        assert_eq!(state.distinct_values(), 2);
        assert_eq!(state.get(b"7"), Some(2));
        assert_eq!(state.get(b"8"), None);
        assert_eq!(state.assignments(), vec![(&b"42"[..], 1), (&b"7"[..], 2)]);
    }

    #[test]
    fn test_compile_rules_skips_invalid_entries() {
        let config = RuleConfig {
            definitions: vec![
                definition(1, r"host-(\d+)", "HOST{0}"),
                definition(2, r"bad(", "X{0}"),
                definition(3, r"user (\w+)", "user {1}"),
                definition(4, r"ip (\S+)", "IP{}"),
            ],
            skipped_lines: vec![],
        };
        let rule_set = compile_rules(&config);
        assert_eq!(rule_set.len(), 2);
        assert_eq!(rule_set.rules[0].line_number, 1);
        assert_eq!(rule_set.rules[1].line_number, 4);
        assert_eq!(rule_set.rules[1].pattern(), r"ip (\S+)");
    }

    #[test]
    fn test_compile_rule_errors_carry_line_number() {
        let err = compile_rule(&definition(9, r"(unclosed", "X")).unwrap_err();
        assert!(matches!(err, ScrubError::InvalidPattern { line: 9, .. }));

        let err = compile_rule(&definition(10, r"(ok)", "X{")).unwrap_err();
        assert!(matches!(err, ScrubError::InvalidTemplate { line: 10, .. }));
    }

    #[test]
    fn test_pattern_without_group_still_compiles() {
        let rule = compile_rule(&definition(1, "foo", "bar")).unwrap();
        assert_eq!(rule.regex.captures_len(), 1);
        assert_eq!(rule.state.distinct_values(), 0);
    }
}
