// ============================================================================
// easyff-cli/src/progress.rs
// ============================================================================
//
// PROGRESS: Spinner shown while ffmpeg runs
//
// ffmpeg's own `-stats` output is only visible in debug mode. Otherwise the
// CLI wraps the transcoder in `SpinnerTranscoder`, which shows an indicatif
// spinner with the elapsed time for as long as the child process runs.
// indicatif hides the spinner by itself when stderr is not a terminal.

use easyff_core::{CoreResult, Transcoder};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} [{elapsed_precise}]";

/// [`Transcoder`] decorator that shows a spinner while the inner one runs.
#[derive(Debug, Clone)]
pub struct SpinnerTranscoder<T> {
    inner: T,
}

impl<T> SpinnerTranscoder<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Transcoder> Transcoder for SpinnerTranscoder<T> {
    fn run(&self, args: &[OsString], show_output: bool) -> CoreResult<ExitStatus> {
        if show_output {
            return self.inner.run(args, show_output);
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            spinner.set_style(style);
        }
        spinner.set_message(spinner_message(args));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = self.inner.run(args, show_output);
        spinner.finish_and_clear();
        result
    }
}

/// "Writing <output file name>" for an ffmpeg argument list ending in
/// `<output> -y`.
fn spinner_message(args: &[OsString]) -> String {
    args.len()
        .checked_sub(2)
        .and_then(|index| args.get(index))
        .and_then(|output| Path::new(output).file_name())
        .map(|name| format!("Writing {}", name.to_string_lossy()))
        .unwrap_or_else(|| "Running ffmpeg".to_string())
}
