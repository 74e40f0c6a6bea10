// easyff-cli/src/lib.rs
//
// Library portion of the easyff CLI application.
// Contains argument definitions, prompts and the dispatcher.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::run::{EXIT_USAGE, dispatch, run};
