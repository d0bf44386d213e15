// confscrub-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test; // For integrating with `env_logger` in tests

use confscrub_core::{RuleConfig, RuleSet, ScrubError};

fn write_config(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_rule_set_from_file() -> Result<()> {
    let file = write_config(
        "# Cisco config scrubbing rules\n\
         \n\
         \"hostname (\\S+)\"          \"hostname router{0}\"\n\
         \"snmp-server community (\\S+)\" \"snmp-server community COMMUNITY{}\"\n",
    )?;

    let rule_set = RuleSet::load_from_file(file.path())?;
    assert_eq!(rule_set.len(), 2);
    assert_eq!(rule_set.rules[0].line_number, 3);
    assert_eq!(rule_set.rules[0].pattern(), r"hostname (\S+)");
    assert_eq!(rule_set.rules[1].template.as_str(), "snmp-server community COMMUNITY{}");
    Ok(())
}

#[test]
fn test_malformed_line_is_skipped_and_loading_continues() -> Result<()> {
    let file = write_config("\"a(\\d)\" \"A{}\"\njustsomebadtext\n\"b(\\d)\" \"B{}\"\n")?;

    let config = RuleConfig::load_from_file(file.path())?;
    assert_eq!(config.skipped_lines, vec![2]);
    assert_eq!(config.definitions.len(), 2);

    let rule_set = RuleSet::load_from_file(file.path())?;
    assert_eq!(rule_set.len(), 2);
    Ok(())
}

#[test]
fn test_only_comments_and_blanks_is_fatal() -> Result<()> {
    let file = write_config("# nothing here\n\n   \n  # still nothing\n")?;
    let err = RuleSet::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ScrubError::NoPatternsLoaded));
    Ok(())
}

#[test]
fn test_all_rules_invalid_is_fatal() -> Result<()> {
    let file = write_config("\"bad(\" \"X{}\"\n\"ok(\\d)\" \"X{1}\"\n")?;
    let err = RuleSet::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ScrubError::NoPatternsLoaded));
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.txt");
    let err = RuleSet::load_from_file(&path).unwrap_err();
    match err {
        ScrubError::ConfigOpen { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
