//! Core library for running pre-built ffmpeg operations over lists of files.
//!
//! The crate provides a fixed registry of operations (remuxing FLV to MP4,
//! compressing to a target size or quality, removing audio), input
//! validation, ffprobe metadata probing, and a sequential runner that invokes
//! ffmpeg once per file and removes partial output when ffmpeg fails.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use easyff_core::{
//!     FfmpegTranscoder, FfprobeExecutor, FixedAnswer, OperationRegistry, RunConfigBuilder,
//!     Toolchain, process_files,
//! };
//! use std::path::PathBuf;
//!
//! let registry = OperationRegistry::standard();
//! let operation = registry.build("Compress to Size", Some("25mb")).unwrap();
//! let config = RunConfigBuilder::new().threads(4).build();
//!
//! let transcoder = FfmpegTranscoder::default();
//! let probe = FfprobeExecutor::default();
//! let tools = Toolchain {
//!     transcoder: &transcoder,
//!     probe: &probe,
//! };
//!
//! let files = vec![PathBuf::from("holiday.mp4")];
//! let summary = process_files(operation.as_ref(), &files, &config, tools, &FixedAnswer(false));
//! println!("{} file(s) processed", summary.succeeded());
//! ```

pub mod config;
pub mod confirm;
pub mod error;
pub mod external;
pub mod operations;
pub mod processing;
pub mod registry;
pub mod size;
pub mod utils;

// Re-exports for public API
pub use config::{RunConfig, RunConfigBuilder, ToolPaths};
pub use confirm::{Confirmation, Confirmer, FixedAnswer};
pub use error::{CoreError, CoreResult};
pub use external::{
    FfmpegTranscoder, FfprobeExecutor, MediaInfo, MediaProbe, Transcoder, check_dependency,
};
pub use operations::{Operation, OperationDescriptor, Toolchain};
pub use processing::{FileOutcome, FileReport, RunSummary, process_files};
pub use registry::OperationRegistry;
pub use size::{is_valid_size, parse_size};
pub use utils::{calculate_size_reduction, format_bytes, format_duration};
