//! Command implementations for the CLI.

/// The dispatcher: one operation over a list of files.
pub mod run;
