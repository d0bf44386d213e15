//! The scrub command: wires files and streams to the core session driver.
//!
//! Rules are loaded and the source is opened before the output file is
//! created, so a fatal startup error leaves no output file behind.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use confscrub_core::{scrub_stream, MappingReport, RegexScrubber, RuleSet, ScrubError, ScrubSummary};

use crate::cli::Cli;

/// Options for a single scrub run.
#[derive(Debug, Clone)]
pub struct ScrubOptions {
    pub source: PathBuf,
    /// `None` writes to standard output.
    pub output: Option<PathBuf>,
    pub config: PathBuf,
    pub mapping_out: Option<PathBuf>,
}

impl From<&Cli> for ScrubOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            source: cli.source.clone(),
            output: cli.output_path().map(Path::to_path_buf),
            config: cli.config.clone(),
            mapping_out: cli.mapping_out.clone(),
        }
    }
}

fn open_source(path: &Path) -> Result<BufReader<File>, ScrubError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ScrubError::SourceOpen {
            path: path.to_path_buf(),
            source,
        })
}

fn create_output(path: &Path) -> Result<BufWriter<File>, ScrubError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ScrubError::OutputOpen {
            path: path.to_path_buf(),
            source,
        })
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, ScrubError> {
    match path {
        Some(path) => {
            debug!("Writing scrubbed output to '{}'", path.display());
            Ok(Box::new(create_output(path)?))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Runs one scrub session and returns its summary.
pub fn run_scrub(opts: &ScrubOptions) -> Result<ScrubSummary> {
    let rule_set = RuleSet::load_from_file(&opts.config)
        .with_context(|| format!("Failed to load rules from '{}'", opts.config.display()))?;
    let source = open_source(&opts.source)?;
    let mut writer = open_output(opts.output.as_deref())?;

    let mut scrubber = RegexScrubber::new(rule_set);
    let summary = scrub_stream(&mut scrubber, source, &mut writer)
        .and_then(|summary| writer.flush().map(|_| summary).map_err(ScrubError::from))
        .with_context(|| format!("Scrubbing '{}' failed", opts.source.display()))?;

    if let Some(path) = &opts.mapping_out {
        let report = MappingReport::new(&scrubber.into_rules(), summary);
        create_output(path)
            .and_then(|file| report.write_json(file))
            .with_context(|| format!("Failed to write identifier mapping to '{}'", path.display()))?;
        info!("Wrote identifier mapping to '{}'", path.display());
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_run_scrub_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ScrubOptions {
            config: write(dir.path(), "rules.txt", "\"(host-\\d+)\" \"HOST{0}\"\n"),
            source: write(dir.path(), "in.cfg", "host-42 is up\nhost-7 is down\nhost-42 rebooted\n"),
            output: Some(dir.path().join("out.cfg")),
            mapping_out: None,
        };

        let summary = run_scrub(&opts).unwrap();
        assert_eq!(summary.replacements, 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("out.cfg")).unwrap(),
            "HOST1 is up\nHOST2 is down\nHOST1 rebooted\n"
        );
    }

    #[test]
    fn test_missing_source_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let opts = ScrubOptions {
            config: write(dir.path(), "rules.txt", "\"a(b)\" \"c\"\n"),
            source: dir.path().join("missing.cfg"),
            output: Some(dir.path().join("out.cfg")),
            mapping_out: None,
        };

        let err = run_scrub(&opts).unwrap_err();
        assert!(matches!(err.downcast_ref::<ScrubError>(), Some(ScrubError::SourceOpen { .. })));
        assert!(!dir.path().join("out.cfg").exists());
    }

    #[test]
    fn test_errors_carry_context_and_cause() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("missing-rules.txt");
        let opts = ScrubOptions {
            config: config.clone(),
            source: write(dir.path(), "in.cfg", "x\n"),
            output: None,
            mapping_out: None,
        };

        let err = run_scrub(&opts).unwrap_err();
        let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
        assert_eq!(chain.len(), 3, "chain: {chain:?}");
        assert_eq!(chain[0], format!("Failed to load rules from '{}'", config.display()));
        assert_eq!(chain[1], format!("Unable to open config file '{}'", config.display()));
        assert!(matches!(err.downcast_ref::<ScrubError>(), Some(ScrubError::ConfigOpen { .. })));
    }

    #[test]
    fn test_unwritable_mapping_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = dir.path().join("no-such-dir").join("mapping.json");
        let opts = ScrubOptions {
            config: write(dir.path(), "rules.txt", "\"id=(\\d+)\" \"{}\"\n"),
            source: write(dir.path(), "in.cfg", "id=4\n"),
            output: Some(dir.path().join("out.cfg")),
            mapping_out: Some(mapping.clone()),
        };

        let err = run_scrub(&opts).unwrap_err();
        let message = format!("{:#}", err);
        assert!(
            message.starts_with(&format!("Failed to write identifier mapping to '{}'", mapping.display())),
            "message: {message}"
        );
        assert!(message.contains("Unable to open output file"), "message: {message}");
        assert_eq!(fs::read_to_string(dir.path().join("out.cfg")).unwrap(), "id=1\n");
    }
}
