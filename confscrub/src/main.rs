// confscrub/src/main.rs
//! confscrub entry point.
//!
//! Exit codes: 0 on success, 1 on any fatal error (unreadable rule file, no
//! usable rules, unreadable source, unwritable output). Argument errors exit
//! with clap's usage code (2).

use clap::Parser;
use log::error;
use std::process::ExitCode;

use confscrub::cli::Cli;
use confscrub::logger;
use confscrub::{run_scrub, ScrubOptions};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(Some(logger::level_for(cli.verbose)));

    match run_scrub(&ScrubOptions::from(&cli)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // `{:#}` prints the whole chain: context, then each underlying cause.
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}
