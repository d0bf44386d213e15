//! Logger setup for the `confscrub` binary.
//!
//! Diagnostics go to stderr through `env_logger`. Warnings and errors carry
//! a level label (coloured when stderr is a terminal); info and debug lines
//! are printed as-is. `RUST_LOG` overrides the level chosen on the command line.

use env_logger::{Builder, Env};
use is_terminal::IsTerminal;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use std::io::Write;

/// Initializes the global logger. Safe to call more than once; later calls are ignored.
///
/// `None` means the default level, which only lets warnings and errors through.
pub fn init_logger(level: Option<LevelFilter>) {
    let use_color = std::io::stderr().is_terminal();

    let mut builder = Builder::new();
    builder
        .filter_level(level.unwrap_or(LevelFilter::Warn))
        .parse_env(Env::default())
        .format(move |buf, record| {
            let label = match record.level() {
                Level::Error if use_color => format!("{} ", "error:".red().bold()),
                Level::Error => "error: ".to_string(),
                Level::Warn if use_color => format!("{} ", "warning:".yellow().bold()),
                Level::Warn => "warning: ".to_string(),
                _ => String::new(),
            };
            writeln!(buf, "{}{}", label, record.args())
        });

    let _ = builder.try_init();
}

/// Level used for a run, given the `--verbose` flag.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}
