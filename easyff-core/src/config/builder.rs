// ============================================================================
// easyff-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for RunConfig
//
// Fluent construction of a RunConfig. The thread count is clamped when the
// configuration is built, so a RunConfig never carries a value ffmpeg would
// be asked to oversubscribe with.

use super::{RunConfig, available_threads, clamp_threads};

/// Builder for creating [`RunConfig`] instances.
#[derive(Debug, Clone)]
pub struct RunConfigBuilder {
    debug: bool,
    threads: Option<usize>,
    extra_argument: Option<String>,
}

impl RunConfigBuilder {
    /// Creates a builder with debug off, all processors and no extra argument.
    pub fn new() -> Self {
        Self {
            debug: false,
            threads: None,
            extra_argument: None,
        }
    }

    /// Enables ffmpeg output passthrough and debug logging.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Requests a thread count for ffmpeg.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets the operation-specific argument.
    pub fn extra_argument(mut self, argument: impl Into<String>) -> Self {
        self.extra_argument = Some(argument.into());
        self
    }

    /// Sets or clears the operation-specific argument.
    pub fn maybe_extra_argument(mut self, argument: Option<String>) -> Self {
        self.extra_argument = argument;
        self
    }

    pub fn build(self) -> RunConfig {
        let requested = self.threads.unwrap_or_else(available_threads);
        RunConfig {
            debug: self.debug,
            threads: clamp_threads(requested),
            extra_argument: self.extra_argument,
        }
    }
}

impl Default for RunConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
