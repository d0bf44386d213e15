// confscrub/src/lib.rs
//! # confscrub CLI Application
//!
//! Thin command-line wrapper around `confscrub-core`: argument parsing,
//! logger setup and file handling.

pub mod cli;
pub mod commands;
pub mod logger;

pub use commands::scrub::{run_scrub, ScrubOptions};
