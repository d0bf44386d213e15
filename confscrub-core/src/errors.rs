//! errors.rs - Custom error types for the confscrub-core library.
//!
//! Some variants are fatal to a run (`ConfigOpen`, `NoPatternsLoaded`,
//! `SourceOpen`, `OutputOpen`, `Io`). The rest are recovered where they occur:
//! the offending rule line or match is logged and skipped.
//!
//! Variants wrapping an I/O error keep it as `#[source]` and leave it out of
//! their own message, so an `anyhow` chain prints each cause once.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error types surfaced by `confscrub-core`.
///
/// `#[non_exhaustive]` so new variants can be added without breaking callers
/// that match on this enum.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    #[error("Syntax error in config line {line}, ignoring")]
    ConfigSyntax { line: usize },

    #[error("Invalid pattern in config line {line}: {source}")]
    InvalidPattern {
        line: usize,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid replacement template in config line {line}: {reason}")]
    InvalidTemplate { line: usize, reason: String },

    #[error("Unable to open config file '{}'", .path.display())]
    ConfigOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No target patterns loaded")]
    NoPatternsLoaded,

    #[error("Unable to open source file '{}'", .path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to open output file '{}'", .path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pattern '{pattern}' needs at least one match group")]
    MissingCaptureGroup { pattern: String },

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}
