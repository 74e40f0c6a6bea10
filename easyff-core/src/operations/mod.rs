// ============================================================================
// easyff-core/src/operations/mod.rs
// ============================================================================
//
// OPERATIONS: The contract every pre-built ffmpeg operation implements
//
// An operation is described by a static `OperationDescriptor` (display name,
// accepted extensions, optional extra argument, output naming rule) and
// implements the `Operation` trait. Running one file is split in two steps:
//
// 1. `prepare` decides what to run. It may probe the file and may ask for
//    confirmation, but never writes anything.
// 2. `run_job` invokes ffmpeg exactly once and removes any partial output
//    when ffmpeg fails.
//
// `Operation::execute` ties both steps together for a single file.

use crate::config::RunConfig;
use crate::confirm::{Confirmation, Confirmer};
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{MediaProbe, Transcoder};

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod compress_quality;
pub mod compress_size;
pub mod remux;
pub mod strip_audio;

pub use compress_quality::CompressToQuality;
pub use compress_size::{CompressToTargetSize, target_bitrate};
pub use remux::Remux;
pub use strip_audio::StripAudio;

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Describes the free-form argument an operation needs.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentSpec {
    /// Question shown when the argument has to be asked for
    pub prompt: &'static str,
    /// Returns true when the argument is acceptable
    pub validator: fn(&str) -> bool,
}

/// How an operation names its output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputName {
    /// Same directory, `<prefix><file name>`
    Prefix(&'static str),
    /// Same directory and stem, different extension
    Extension(&'static str),
}

impl OutputName {
    /// Derives the output path for `input`.
    pub fn derive(&self, input: &Path) -> CoreResult<PathBuf> {
        let file_name = input.file_name().ok_or_else(|| {
            CoreError::PathError(format!("Failed to get filename for {}", input.display()))
        })?;

        Ok(match self {
            OutputName::Prefix(prefix) => {
                let mut name = OsString::from(prefix);
                name.push(file_name);
                input.with_file_name(name)
            }
            OutputName::Extension(extension) => input.with_extension(extension),
        })
    }
}

/// Immutable description of an operation.
#[derive(Debug)]
pub struct OperationDescriptor {
    /// Display name; the registry key
    pub name: &'static str,
    /// Lower-case extensions without the leading dot
    pub accepted_extensions: &'static [&'static str],
    pub extra_argument: Option<ArgumentSpec>,
    pub output: OutputName,
}

impl OperationDescriptor {
    pub fn requires_extra_argument(&self) -> bool {
        self.extra_argument.is_some()
    }

    pub fn extra_argument_prompt(&self) -> Option<&'static str> {
        self.extra_argument.map(|spec| spec.prompt)
    }

    /// Runs the argument validator. Operations without an extra argument
    /// accept anything.
    pub fn validate_extra_argument(&self, argument: &str) -> bool {
        self.extra_argument
            .is_none_or(|spec| (spec.validator)(argument))
    }
}

// ============================================================================
// JOBS
// ============================================================================

/// One prepared ffmpeg invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Operation-specific flags placed between the input and `-threads`
    pub flags: Vec<OsString>,
}

impl Job {
    pub fn new<I, S>(input: &Path, output: PathBuf, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            input: input.to_path_buf(),
            output,
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    /// The full ffmpeg argument list:
    /// `-v error -stats -i <input> <flags> -threads <n> <output> -y`.
    pub fn command_args(&self, threads: usize) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-v", "error", "-stats", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(self.input.clone().into_os_string());
        args.extend(self.flags.iter().cloned());
        args.push("-threads".into());
        args.push(threads.to_string().into());
        args.push(self.output.clone().into_os_string());
        args.push("-y".into());
        args
    }
}

/// Result of preparing a job.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    Ready(Job),
    /// The job may run only if the confirmation is accepted.
    NeedsConfirmation { job: Job, confirmation: Confirmation },
}

/// The external tools an operation may use.
#[derive(Clone, Copy)]
pub struct Toolchain<'a> {
    pub transcoder: &'a dyn Transcoder,
    pub probe: &'a dyn MediaProbe,
}

// ============================================================================
// OPERATION CONTRACT
// ============================================================================

pub trait Operation: fmt::Debug {
    fn descriptor(&self) -> &'static OperationDescriptor;

    fn name(&self) -> &'static str {
        self.descriptor().name
    }

    fn accepted_extensions(&self) -> &'static [&'static str] {
        self.descriptor().accepted_extensions
    }

    /// Case-insensitive extension check.
    fn accepts_extension(&self, extension: &str) -> bool {
        self.accepted_extensions()
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    }

    /// Checks that `input` exists and has an accepted extension.
    fn check_input(&self, input: &Path) -> CoreResult<()> {
        if !input.exists() {
            return Err(CoreError::FileNotFound(input.to_path_buf()));
        }

        let extension = input
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.accepts_extension(&extension) {
            return Err(CoreError::UnsupportedExtension {
                extension,
                operation: self.name().to_string(),
            });
        }
        Ok(())
    }

    fn requires_extra_argument(&self) -> bool {
        self.descriptor().requires_extra_argument()
    }

    /// Returns false (after logging why) when `input` is missing or has an
    /// extension this operation does not accept.
    fn validate(&self, input: &Path) -> bool {
        match self.check_input(input) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}. Ignoring...");
                false
            }
        }
    }

    fn output_path(&self, input: &Path) -> CoreResult<PathBuf> {
        self.descriptor().output.derive(input)
    }

    /// Builds the job for `input`. May probe; never writes.
    fn prepare(&self, input: &Path, probe: &dyn MediaProbe) -> CoreResult<Prepared>;

    /// Validates, prepares and runs one file, returning the new file's path.
    ///
    /// A declined confirmation is reported as `CoreError::UserDeclined`.
    fn execute(
        &self,
        input: &Path,
        config: &RunConfig,
        tools: Toolchain<'_>,
        confirmer: &dyn Confirmer,
    ) -> CoreResult<PathBuf> {
        self.check_input(input)?;

        let job = match self.prepare(input, tools.probe)? {
            Prepared::Ready(job) => job,
            Prepared::NeedsConfirmation { job, confirmation } => {
                log::warn!("{} for \"{}\"", confirmation.reason, input.display());
                if !confirmer.confirm(&confirmation) {
                    return Err(CoreError::UserDeclined(confirmation.reason));
                }
                job
            }
        };

        run_job(&job, config, tools.transcoder)
    }
}

// ============================================================================
// JOB EXECUTION
// ============================================================================

/// Runs a prepared job with exactly one transcoder invocation.
///
/// On a non-zero exit or a failure to start, any file at the output path is
/// deleted before the error is returned.
pub fn run_job(job: &Job, config: &RunConfig, transcoder: &dyn Transcoder) -> CoreResult<PathBuf> {
    let args = job.command_args(config.threads);

    match transcoder.run(&args, config.debug) {
        Ok(status) if status.success() => Ok(job.output.clone()),
        Ok(status) => {
            log::error!("ffmpeg failed for \"{}\": {}", job.input.display(), status);
            remove_partial_output(&job.output);
            Err(command_failed_error(
                "ffmpeg",
                status,
                format!("could not create \"{}\"", job.output.display()),
            ))
        }
        Err(e) => {
            remove_partial_output(&job.output);
            Err(e)
        }
    }
}

fn remove_partial_output(output: &Path) {
    if !output.exists() {
        return;
    }
    match std::fs::remove_file(output) {
        Ok(()) => log::info!("Removed partial output \"{}\"", output.display()),
        Err(e) => log::error!(
            "Failed to remove partial output \"{}\": {}",
            output.display(),
            e
        ),
    }
}

/// Flags for stream-copy operations.
pub(crate) fn copy_flags<'a>(extra: &[&'a str]) -> Vec<&'a str> {
    let mut flags = vec!["-c", "copy", "-copyts"];
    flags.extend_from_slice(extra);
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::{MockMediaProbe, MockTranscoder};
    use std::fs;
    use tempfile::tempdir;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_output_name_prefix() {
        let path = OutputName::Prefix("compressed_")
            .derive(Path::new("/videos/clip.mp4"))
            .unwrap();
        assert_eq!(path, PathBuf::from("/videos/compressed_clip.mp4"));

        let path = OutputName::Prefix("noaudio_").derive(Path::new("clip.mkv")).unwrap();
        assert_eq!(path, PathBuf::from("noaudio_clip.mkv"));
    }

    #[test]
    fn test_output_name_extension() {
        let path = OutputName::Extension("mp4")
            .derive(Path::new("/videos/clip.flv"))
            .unwrap();
        assert_eq!(path, PathBuf::from("/videos/clip.mp4"));
    }

    #[test]
    fn test_output_name_requires_file_name() {
        assert!(OutputName::Prefix("x_").derive(Path::new("/")).is_err());
    }

    #[test]
    fn test_job_command_args() {
        let job = Job::new(
            Path::new("in dir/clip.flv"),
            PathBuf::from("in dir/clip.mp4"),
            ["-c", "copy"],
        );
        assert_eq!(
            strings(&job.command_args(4)),
            [
                "-v", "error", "-stats", "-i", "in dir/clip.flv", "-c", "copy", "-threads", "4",
                "in dir/clip.mp4", "-y"
            ]
        );
    }

    #[test]
    fn test_check_input() {
        let tmp = tempdir().unwrap();
        let flv = tmp.path().join("clip.FLV");
        let txt = tmp.path().join("notes.txt");
        let bare = tmp.path().join("noext");
        for path in [&flv, &txt, &bare] {
            fs::write(path, b"x").unwrap();
        }

        assert!(Remux.check_input(&flv).is_ok());
        assert!(matches!(
            Remux.check_input(&txt),
            Err(CoreError::UnsupportedExtension { ref extension, .. }) if extension == "txt"
        ));
        assert!(matches!(
            Remux.check_input(&bare),
            Err(CoreError::UnsupportedExtension { .. })
        ));
        assert!(matches!(
            Remux.check_input(&tmp.path().join("missing.flv")),
            Err(CoreError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_run_job_success_returns_output() {
        let tmp = tempdir().unwrap();
        let output = tmp.path().join("out.mp4");
        let job = Job::new(&tmp.path().join("in.flv"), output.clone(), ["-c", "copy"]);
        let transcoder = MockTranscoder::succeeding();

        let result = run_job(&job, &RunConfig::new(1), &transcoder).unwrap();
        assert_eq!(result, output);
        assert!(output.exists());
        assert_eq!(transcoder.get_received_calls().len(), 1);
    }

    #[test]
    fn test_run_job_failure_removes_partial_output() {
        let tmp = tempdir().unwrap();
        let output = tmp.path().join("out.mp4");
        let job = Job::new(&tmp.path().join("in.flv"), output.clone(), ["-c", "copy"]);
        let transcoder = MockTranscoder::failing(1).writes_output(true);

        let err = run_job(&job, &RunConfig::new(1), &transcoder).unwrap_err();
        assert!(matches!(err, CoreError::CommandFailed { .. }));
        assert!(!output.exists(), "partial output should have been removed");
    }

    #[test]
    fn test_run_job_failure_without_output_is_fine() {
        let tmp = tempdir().unwrap();
        let output = tmp.path().join("out.mp4");
        let job = Job::new(&tmp.path().join("in.flv"), output.clone(), ["-c", "copy"]);
        let transcoder = MockTranscoder::failing(3);

        assert!(run_job(&job, &RunConfig::new(1), &transcoder).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_execute_rejects_invalid_input_without_running() {
        let tmp = tempdir().unwrap();
        let transcoder = MockTranscoder::succeeding();
        let probe = MockMediaProbe::returning(1, 1.0);
        let tools = Toolchain {
            transcoder: &transcoder,
            probe: &probe,
        };

        let missing = tmp.path().join("missing.mp4");
        let err = StripAudio
            .execute(&missing, &RunConfig::new(1), tools, &crate::FixedAnswer(true))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(transcoder.get_received_calls().is_empty());
        assert_eq!(probe.probe_count(), 0);
    }
}
