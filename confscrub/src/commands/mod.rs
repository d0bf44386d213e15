//! Command implementations for the confscrub CLI.

pub mod scrub;
