// easyff-core/tests/common/mod.rs
//
// Test doubles for the public `Transcoder` and `MediaProbe` seams.

#![allow(dead_code)]

use easyff_core::{CoreError, CoreResult, MediaInfo, MediaProbe, Transcoder};
use std::cell::RefCell;
use std::ffi::OsString;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::ExitStatus;

/// Records each argument list and writes a small file at the output position.
pub struct RecordingTranscoder {
    pub exit_code: i32,
    pub calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingTranscoder {
    pub fn new(exit_code: i32) -> Self {
        Self {
            exit_code,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl Transcoder for RecordingTranscoder {
    fn run(&self, args: &[OsString], _show_output: bool) -> CoreResult<ExitStatus> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        if let Some(output) = args.len().checked_sub(2).and_then(|i| args.get(i)) {
            std::fs::write(output, b"encoded")?;
        }
        self.calls.borrow_mut().push(args);
        Ok(ExitStatus::from_raw(self.exit_code << 8))
    }
}

/// Returns the same metadata for every file.
pub struct FixedProbe(pub Option<(u64, f64)>);

impl MediaProbe for FixedProbe {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        let (size_bytes, duration_secs) = self.0.ok_or_else(|| {
            CoreError::ProbeParse(format!("no metadata for {}", input_path.display()))
        })?;
        Ok(MediaInfo {
            size_bytes,
            duration_secs,
            streams: Vec::new(),
        })
    }
}
