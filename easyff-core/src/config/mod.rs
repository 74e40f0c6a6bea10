//! Run configuration for the easyff-core library.
//!
//! A [`RunConfig`] is created once by the caller (normally easyff-cli) before
//! any file is processed and is only ever read by operations. [`ToolPaths`]
//! names the ffmpeg and ffprobe executables to invoke.

mod builder;

use std::path::PathBuf;

pub use builder::RunConfigBuilder;

/// Default ffmpeg executable, resolved through `PATH`.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Default ffprobe executable, resolved through `PATH`.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Environment variable overriding the ffmpeg executable.
pub const FFMPEG_ENV: &str = "EASYFF_FFMPEG";

/// Environment variable overriding the ffprobe executable.
pub const FFPROBE_ENV: &str = "EASYFF_FFPROBE";

/// Settings shared by every file of a run.
///
/// The thread count is forwarded to ffmpeg as `-threads`; it does not control
/// parallelism inside easyff, which handles files one at a time.
///
/// # Examples
///
/// ```rust
/// use easyff_core::config::RunConfigBuilder;
///
/// let config = RunConfigBuilder::new()
///     .debug(true)
///     .threads(2)
///     .extra_argument("12.5mb")
///     .build();
/// assert!(config.threads >= 1);
/// assert_eq!(config.extra_argument.as_deref(), Some("12.5mb"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Show ffmpeg's own output and log at debug level
    pub debug: bool,

    /// Thread count passed to ffmpeg, always within `1..=available CPUs`
    pub threads: usize,

    /// Operation-specific argument (target size, quality factor)
    pub extra_argument: Option<String>,
}

impl RunConfig {
    /// Creates a configuration with the given thread request, clamped to the
    /// host's processor count.
    pub fn new(threads: usize) -> Self {
        Self {
            debug: false,
            threads: clamp_threads(threads),
            extra_argument: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(available_threads())
    }
}

/// Locations of the external executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(DEFAULT_FFMPEG),
            ffprobe: PathBuf::from(DEFAULT_FFPROBE),
        }
    }
}

/// Number of logical processors on this host (at least 1).
pub fn available_threads() -> usize {
    num_cpus::get().max(1)
}

/// Clamps a requested thread count into `1..=available_threads()`.
pub fn clamp_threads(requested: usize) -> usize {
    requested.clamp(1, available_threads())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_threads() {
        let max = available_threads();
        assert_eq!(clamp_threads(0), 1);
        assert_eq!(clamp_threads(1), 1);
        assert_eq!(clamp_threads(max), max);
        assert_eq!(clamp_threads(max + 64), max);
    }

    #[test]
    fn test_default_config_uses_all_processors() {
        let config = RunConfig::default();
        assert_eq!(config.threads, available_threads());
        assert!(!config.debug);
        assert!(config.extra_argument.is_none());
    }

    #[test]
    fn test_default_tool_paths() {
        let tools = ToolPaths::default();
        assert_eq!(tools.ffmpeg, PathBuf::from("ffmpeg"));
        assert_eq!(tools.ffprobe, PathBuf::from("ffprobe"));
    }
}
