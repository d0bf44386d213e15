//! This file defines the command-line interface (CLI) for the confscrub application.
//! License: MIT OR Apache-2.0

use clap::Parser;
use confscrub_core::DEFAULT_CONFIG_FILE;
use std::path::{Path, PathBuf};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "confscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find and replace patterns in a configuration file with stable identifiers",
    long_about = "confscrub rewrites a configuration file (for example a router config) using a list of \
                  regex rules. Each distinct value captured by a rule is replaced by that rule's template \
                  with a sequential identifier, so the same value always maps to the same replacement.",
)]
pub struct Cli {
    /// Source file to scrub.
    #[arg(long, short = 's', value_name = "FILE", help = "Source file name.")]
    pub source: PathBuf,

    /// Output file; standard output when absent or `-`.
    #[arg(long, short = 'o', value_name = "FILE", help = "Output file name ('-' for stdout).")]
    pub output: Option<PathBuf>,

    /// Rule file.
    #[arg(
        long,
        short = 'c',
        value_name = "FILE",
        env = "CONFSCRUB_CONFIG",
        default_value = DEFAULT_CONFIG_FILE,
        help = "Rule file (quoted pattern and replacement per line)."
    )]
    pub config: PathBuf,

    /// Print diagnostics (matches, totals) to stderr.
    #[arg(long, short = 'v', help = "Verbose output.")]
    pub verbose: bool,

    /// Write the value-to-identifier mapping of every rule as JSON.
    #[arg(long = "mapping-out", value_name = "FILE", help = "Write the identifier mapping report (JSON) to this file.")]
    pub mapping_out: Option<PathBuf>,
}

impl Cli {
    /// The output file, or `None` for standard output.
    pub fn output_path(&self) -> Option<&Path> {
        self.output
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}
