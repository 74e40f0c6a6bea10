// easyff-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;
use easyff_core::config::{DEFAULT_FFMPEG, DEFAULT_FFPROBE, FFMPEG_ENV, FFPROBE_ENV};
use easyff_core::{OperationRegistry, ToolPaths};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "easyff",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "easyff: Simply run popular ffmpeg commands",
    long_about = "Runs a small set of pre-built ffmpeg operations (remux, compress, remove audio) \
                  over a list of files. Anything not given on the command line is asked for \
                  interactively."
)]
pub struct Cli {
    /// File(s) to process
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Show debug output, including ffmpeg's own progress
    #[arg(short, long)]
    pub debug: bool,

    /// Command to run
    #[arg(short, long, value_name = "NAME", help = command_help())]
    pub command: Option<String>,

    /// Threads for ffmpeg to use (defaults to all processors)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Extra argument for the command, e.g. a size ("12.5mb") or quality ("23")
    #[arg(short, long, value_name = "ARGS", allow_hyphen_values = true)]
    pub arguments: Option<String>,

    /// ffmpeg executable to run
    #[arg(long, value_name = "PATH", env = FFMPEG_ENV, default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,

    /// ffprobe executable to run
    #[arg(long, value_name = "PATH", env = FFPROBE_ENV, default_value = DEFAULT_FFPROBE)]
    pub ffprobe: PathBuf,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Offer to delete the original files once they were processed successfully
    #[arg(long)]
    pub delete_originals: bool,
}

impl Cli {
    pub fn tool_paths(&self) -> ToolPaths {
        ToolPaths {
            ffmpeg: self.ffmpeg.clone(),
            ffprobe: self.ffprobe.clone(),
        }
    }
}

fn command_help() -> String {
    let names: Vec<String> = OperationRegistry::standard()
        .names()
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect();
    format!("Command to run: {}", names.join(", "))
}
