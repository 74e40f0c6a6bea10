// ============================================================================
// easyff-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Running the transcoder as a child process
//
// The `Transcoder` trait is the seam between the job runner and the real
// ffmpeg binary. Jobs hand it a fully built argument list (one token per
// element, never a shell string) and get back the exit status. The call
// blocks until ffmpeg exits; there is no timeout.

use crate::error::{CoreResult, command_start_error};
use super::format_command;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Something that can run ffmpeg with a prepared argument list.
pub trait Transcoder {
    /// Runs the transcoder and waits for it to exit.
    ///
    /// When `show_output` is false the tool's stdout and stderr are
    /// discarded; otherwise they are inherited from this process.
    fn run(&self, args: &[OsString], show_output: bool) -> CoreResult<ExitStatus>;
}

/// [`Transcoder`] that spawns an ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FFMPEG)
    }
}

impl Transcoder for FfmpegTranscoder {
    fn run(&self, args: &[OsString], show_output: bool) -> CoreResult<ExitStatus> {
        log::debug!(
            "Running ffmpeg: {}",
            format_command(self.ffmpeg_path.as_os_str(), args)
        );

        let (stdout, stderr) = if show_output {
            (Stdio::inherit(), Stdio::inherit())
        } else {
            (Stdio::null(), Stdio::null())
        };

        Command::new(&self.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .map_err(|e| {
                log::error!("Failed to start ffmpeg: {}", e);
                command_start_error("ffmpeg", e)
            })
    }
}
