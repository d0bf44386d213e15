//! Identifier mapping report.
//!
//! After a session, the captured values each rule replaced and the
//! identifiers they were given can be exported as JSON, so scrubbed output
//! can be traced back to the original values by whoever holds the report.
//! Captured bytes that are not valid UTF-8 are shown with replacement
//! characters.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::compiler::RuleSet;
use crate::errors::ScrubError;
use crate::session::ScrubSummary;

/// A captured value and its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub id: u64,
    pub value: String,
}

/// Per-rule section of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleReport {
    pub config_line: usize,
    pub pattern: String,
    pub template: String,
    pub replacements: u64,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MappingReport {
    pub generated_at: DateTime<Utc>,
    pub summary: ScrubSummary,
    pub rules: Vec<RuleReport>,
}

impl MappingReport {
    /// Builds the report from a rule set after scrubbing.
    pub fn new(rule_set: &RuleSet, summary: ScrubSummary) -> Self {
        let rules = rule_set
            .iter()
            .map(|rule| RuleReport {
                config_line: rule.line_number,
                pattern: rule.pattern().to_string(),
                template: rule.template.as_str().to_string(),
                replacements: rule.replacements,
                assignments: rule
                    .state
                    .assignments()
                    .into_iter()
                    .map(|(value, id)| Assignment {
                        id,
                        value: String::from_utf8_lossy(value).into_owned(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            summary,
            rules,
        }
    }

    /// Writes the report as pretty-printed JSON followed by a newline.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<(), ScrubError> {
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| ScrubError::Io(std::io::Error::other(e)))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_rules;
    use crate::config::RuleConfig;
    use crate::session::scrub_string;

    #[test]
    fn test_report_lists_assignments_in_identifier_order() {
        let config = RuleConfig::from_str_content("# c\n\"host (\\w+)\" \"h{}\"\n").unwrap();
        let (_, summary, rule_set) =
            scrub_string(compile_rules(&config), "host zeta\nhost alpha\nhost zeta\n").unwrap();

        let report = MappingReport::new(&rule_set, summary);
        assert_eq!(report.rules.len(), 1);
        let rule = &report.rules[0];
        assert_eq!(rule.config_line, 2);
        assert_eq!(rule.template, "h{}");
        assert_eq!(rule.replacements, 3);
        assert_eq!(
            rule.assignments,
            vec![
                Assignment { id: 1, value: "zeta".to_string() },
                Assignment { id: 2, value: "alpha".to_string() },
            ]
        );

        let mut buf = Vec::new();
        report.write_json(&mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["summary"]["replacements"], 3);
        assert_eq!(json["rules"][0]["assignments"][1]["value"], "alpha");
    }
}
