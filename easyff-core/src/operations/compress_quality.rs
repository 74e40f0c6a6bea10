//! Compress to Quality: re-encode with x264 at a constant rate factor.
//!
//! The quality factor is conventionally 0-51 (lower is better). Any integer is
//! accepted and passed through; ffmpeg enforces its own bounds.

use super::{ArgumentSpec, Job, Operation, OperationDescriptor, OutputName, Prepared};
use crate::error::{CoreError, CoreResult};
use crate::external::MediaProbe;
use std::path::Path;

pub static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
    name: "Compress to Quality",
    accepted_extensions: &["mp4", "mov", "mkv"],
    extra_argument: Some(ArgumentSpec {
        prompt: "Quality factor? (0-51, lower is better, eg: 23)",
        validator: is_valid_quality,
    }),
    output: OutputName::Prefix("quality_"),
};

fn parse_quality(argument: &str) -> Option<i64> {
    argument.trim().parse().ok()
}

fn is_valid_quality(argument: &str) -> bool {
    parse_quality(argument).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressToQuality {
    crf: i64,
}

impl CompressToQuality {
    pub fn new(crf: i64) -> Self {
        Self { crf }
    }

    /// Builds the operation from its quality string, e.g. `"23"`.
    pub fn from_argument(argument: Option<&str>) -> CoreResult<Self> {
        let argument =
            argument.ok_or_else(|| CoreError::MissingArgument(DESCRIPTOR.name.to_string()))?;
        parse_quality(argument)
            .map(Self::new)
            .ok_or_else(|| CoreError::InvalidArgument {
                operation: DESCRIPTOR.name.to_string(),
                message: format!("\"{argument}\" is not an integer quality factor"),
            })
    }

    pub fn crf(&self) -> i64 {
        self.crf
    }
}

impl Operation for CompressToQuality {
    fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTOR
    }

    fn prepare(&self, input: &Path, _probe: &dyn MediaProbe) -> CoreResult<Prepared> {
        let output = self.output_path(input)?;
        let crf = self.crf.to_string();
        Ok(Prepared::Ready(Job::new(
            input,
            output,
            ["-c:v", "libx264", "-crf", crf.as_str()],
        )))
    }
}
