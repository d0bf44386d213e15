// confscrub-core/src/lib.rs
//! # confscrub Core Library
//!
//! `confscrub-core` rewrites configuration text with a list of
//! pattern-to-replacement rules. Each distinct value captured by a rule gets a
//! stable, per-rule sequential identifier (1, 2, 3, ... in first-seen order),
//! and the replacement template interpolates that identifier. Only the span of
//! capture group 1 is replaced, so with the rule `"(host-\d+)" "HOST{0}"`,
//! `host-42 ... host-7 ... host-42` becomes `HOST1 ... HOST2 ... HOST1`.
//!
//! The library does not parse the grammar of the text it scrubs: input is a
//! stream of opaque byte lines, which need not be valid UTF-8.
//!
//! ## Modules
//!
//! * `config`: Parses the line-oriented rule file into `RuleDefinition`s.
//! * `template`: Replacement templates with a `{}` / `{0}` identifier placeholder.
//! * `compiler`: Compiles definitions into a `RuleSet` with per-rule identifier state.
//! * `occurrence`: Match occurrences and the offset-preserving line rebuild.
//! * `engine`: The `LineScrubber` trait.
//! * `scrubber`: `RegexScrubber`, the regex-backed `LineScrubber`.
//! * `session`: Streams a source through a scrubber and totals replacements.
//! * `report`: JSON export of the identifier assignments.
//! * `errors`: The `ScrubError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use confscrub_core::{compile_rules, scrub_string, RuleConfig};
//!
//! let config = RuleConfig::from_str_content(r#""(host-\d+)" "HOST{0}""#).unwrap();
//! let rules = compile_rules(&config);
//!
//! let (out, summary, _rules) =
//!     scrub_string(rules, "host-42 is up\nhost-7 is down\nhost-42 rebooted\n").unwrap();
//!
//! assert_eq!(out, "HOST1 is up\nHOST2 is down\nHOST1 rebooted\n");
//! assert_eq!(summary.to_string(), "3 replacements done");
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod occurrence;
pub mod report;
pub mod scrubber;
pub mod session;
pub mod template;

pub use compiler::{compile_rule, compile_rules, IdentifierState, Rule, RuleSet};
pub use config::{parse_config_line, ConfigLine, RuleConfig, RuleDefinition, DEFAULT_CONFIG_FILE};
pub use engine::{LineScrubber, ScrubbedLine};
pub use errors::ScrubError;
pub use occurrence::{rebuild_line, MatchOccurrence};
pub use report::{Assignment, MappingReport, RuleReport};
pub use scrubber::RegexScrubber;
pub use session::{scrub_stream, scrub_string, ScrubSummary};
pub use template::ReplacementTemplate;
