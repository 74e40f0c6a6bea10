// easyff-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{MediaInfo, MediaProbe, Transcoder};
use crate::error::{CoreError, CoreResult};
use std::cell::RefCell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Mock transcoder that records every argument list it receives.
pub struct MockTranscoder {
    exit_code: i32,
    write_output: bool,
    received_calls: RefCell<Vec<Vec<String>>>,
}

impl MockTranscoder {
    pub fn succeeding() -> Self {
        Self {
            exit_code: 0,
            write_output: true,
            received_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(exit_code: i32) -> Self {
        Self {
            exit_code,
            write_output: false,
            received_calls: RefCell::new(Vec::new()),
        }
    }

    /// Whether the mock writes a file at the output position before
    /// "exiting". A failing mock that writes output simulates a partial file.
    pub fn writes_output(mut self, write_output: bool) -> Self {
        self.write_output = write_output;
        self
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl Transcoder for MockTranscoder {
    fn run(&self, args: &[OsString], _show_output: bool) -> CoreResult<ExitStatus> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        if self.write_output {
            // The output path precedes the trailing "-y"
            if let Some(output) = args.len().checked_sub(2).and_then(|i| args.get(i)) {
                std::fs::write(output, b"mock ffmpeg output")?;
            }
        }

        self.received_calls.borrow_mut().push(args);
        Ok(exit_status(self.exit_code))
    }
}

/// Mock probe returning a fixed result.
pub struct MockMediaProbe {
    info: Option<MediaInfo>,
    probed: RefCell<Vec<PathBuf>>,
}

impl MockMediaProbe {
    pub fn returning(size_bytes: u64, duration_secs: f64) -> Self {
        Self {
            info: Some(MediaInfo {
                size_bytes,
                duration_secs,
                streams: Vec::new(),
            }),
            probed: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            info: None,
            probed: RefCell::new(Vec::new()),
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probed.borrow().len()
    }
}

impl MediaProbe for MockMediaProbe {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        self.probed.borrow_mut().push(input_path.to_path_buf());
        self.info.clone().ok_or_else(|| {
            CoreError::ProbeParse(format!("mock probe failure for {}", input_path.display()))
        })
    }
}
