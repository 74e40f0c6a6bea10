// ============================================================================
// easyff-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every child process easyff starts. Operations
// never build `std::process::Command`s themselves; they go through the
// `Transcoder` and `MediaProbe` traits so tests can substitute mocks.
//
// KEY COMPONENTS:
// - Transcoder / FfmpegTranscoder: runs ffmpeg with a prepared argument list
// - MediaProbe / FfprobeExecutor: runs ffprobe and parses its JSON report
// - check_dependency: verifies an executable can be started at all

use crate::error::{CoreError, CoreResult};

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Traits and implementations for executing ffmpeg
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe
pub mod ffprobe_executor;

#[cfg(test)]
pub(crate) mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{FfmpegTranscoder, Transcoder};
pub use ffprobe_executor::{FfprobeExecutor, MediaInfo, MediaProbe, parse_probe_output};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external executable exists and can be started.
///
/// Runs `<tool> -version` with all output discarded. Only a failure to start
/// the process counts as an error; the exit status is not inspected.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` if the executable cannot be found
/// * `CoreError::CommandStart` if it exists but could not be started
pub fn check_dependency(tool: &Path) -> CoreResult<()> {
    let result = Command::new(tool)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", tool.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", tool.display());
            Err(CoreError::DependencyNotFound(tool.display().to_string()))
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                tool.display(),
                e
            );
            Err(CoreError::CommandStart(tool.display().to_string(), e))
        }
    }
}

// ============================================================================
// COMMAND FORMATTING
// ============================================================================

/// Renders a command line for logs, quoting arguments that contain spaces.
///
/// The result is for humans only; commands are always executed from the
/// argument list, never from this string.
pub fn format_command(program: &OsStr, args: &[OsString]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| {
            let part = part.to_string_lossy();
            if part.is_empty() || part.contains(char::is_whitespace) {
                format!("\"{part}\"")
            } else {
                part.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
