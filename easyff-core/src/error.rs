// ============================================================================
// easyff-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the easyff dispatch layer
//
// Every expected failure of an operation (missing input, unsupported
// extension, bad extra argument, ffprobe trouble, ffmpeg exiting non-zero)
// is reported through `CoreError` rather than a panic. The variants group
// into the categories the CLI reports on:
//
// - validation: the input file is skipped, the run continues
// - argument: the run cannot start until the argument is fixed
// - probe / external tool: that file fails, the run continues
// - declined: the user said no to a confirmation, the file is skipped

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the easyff core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("File \"{}\" does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("File type \"{extension}\" not supported with command \"{operation}\"")]
    UnsupportedExtension {
        extension: String,
        operation: String,
    },

    #[error("Command \"{0}\" requires an extra argument")]
    MissingArgument(String),

    #[error("Invalid argument for \"{operation}\": {message}")]
    InvalidArgument { operation: String, message: String },

    #[error("Invalid size \"{0}\": expected a number followed by kb, mb, gb or tb (e.g. 12.5mb)")]
    InvalidSize(String),

    #[error("Unknown command \"{0}\"")]
    UnknownOperation(String),

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("{command} exited with {status}: {message}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        message: String,
    },

    #[error("Failed to start ffprobe: {0}")]
    ProbeStart(#[source] io::Error),

    #[error("ffprobe exited with {status}: {message}")]
    ProbeFailed { status: ExitStatus, message: String },

    #[error("Failed to parse ffprobe output: {0}")]
    JsonParse(String),

    #[error("ffprobe output is missing \"{field}\" for {}", .path.display())]
    ProbeFieldMissing { field: &'static str, path: PathBuf },

    #[error("ffprobe returned an unusable value: {0}")]
    ProbeParse(String),

    #[error("Declined by user: {0}")]
    UserDeclined(String),

    #[error("Output \"{}\" collides with another file in this run", .0.display())]
    OutputCollision(PathBuf),

    #[error("Path error: {0}")]
    PathError(String),
}

impl CoreError {
    /// True for failures that mean "this file is not eligible" rather than
    /// "processing this file went wrong".
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::FileNotFound(_) | CoreError::UnsupportedExtension { .. }
        )
    }

    /// True for problems with the extra argument, which must be fixed before
    /// any file is processed.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            CoreError::MissingArgument(_)
                | CoreError::InvalidArgument { .. }
                | CoreError::InvalidSize(_)
        )
    }

    /// True for errors raised while probing a file with ffprobe, including
    /// ffprobe failing to start or exiting non-zero.
    pub fn is_probe_error(&self) -> bool {
        matches!(
            self,
            CoreError::ProbeStart(_)
                | CoreError::ProbeFailed { .. }
                | CoreError::JsonParse(_)
                | CoreError::ProbeFieldMissing { .. }
                | CoreError::ProbeParse(_)
        )
    }
}

/// Result type for easyff core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds the error for a child process that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds the error for a child process that exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    message: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        message: message.into(),
    }
}
