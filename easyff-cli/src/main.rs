// easyff-cli/src/main.rs
//
// Entry point for the easyff binary: parse arguments, set up logging, run
// the dispatcher and turn its result into an exit code.

use clap::Parser;
use console::style;
use easyff_cli::{Cli, logging, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold().for_stderr(), e);
            ExitCode::FAILURE
        }
    }
}
