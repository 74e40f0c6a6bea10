//! Compress to Size: re-encode at a constant bitrate chosen so the output
//! lands near a requested file size.
//!
//! The bitrate is `floor(target_bytes * 8 / ceil(duration_secs))`. Rounding
//! the duration up keeps the bitrate from being overestimated for clips with
//! a fractional final second.

use super::{ArgumentSpec, Job, Operation, OperationDescriptor, OutputName, Prepared};
use crate::confirm::Confirmation;
use crate::error::{CoreError, CoreResult};
use crate::external::MediaProbe;
use crate::size::parse_size;
use crate::utils::format_bytes;
use std::path::Path;

pub static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
    name: "Compress to Size",
    accepted_extensions: &["mp4", "mov", "mkv"],
    extra_argument: Some(ArgumentSpec {
        prompt: "Size to compress to? (eg: 12.5mb)",
        validator: is_valid_target,
    }),
    output: OutputName::Prefix("compressed_"),
};

fn is_valid_target(argument: &str) -> bool {
    parse_size(argument).is_ok_and(|bytes| bytes > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressToTargetSize {
    target_bytes: u64,
}

impl CompressToTargetSize {
    /// # Errors
    ///
    /// `CoreError::InvalidArgument` for a zero target.
    pub fn new(target_bytes: u64) -> CoreResult<Self> {
        if target_bytes == 0 {
            return Err(CoreError::InvalidArgument {
                operation: DESCRIPTOR.name.to_string(),
                message: "target size must be greater than zero".to_string(),
            });
        }
        Ok(Self { target_bytes })
    }

    /// Builds the operation from its size string, e.g. `"12.5mb"`.
    pub fn from_argument(argument: Option<&str>) -> CoreResult<Self> {
        let argument =
            argument.ok_or_else(|| CoreError::MissingArgument(DESCRIPTOR.name.to_string()))?;
        Self::new(parse_size(argument)?)
    }

    pub fn target_bytes(&self) -> u64 {
        self.target_bytes
    }
}

/// Constant bitrate in bits per second that fits `target_bytes` into
/// `duration_secs` of media.
///
/// # Errors
///
/// `CoreError::ProbeParse` when the duration is zero, negative or not finite.
pub fn target_bitrate(target_bytes: u64, duration_secs: f64) -> CoreResult<u64> {
    let seconds = duration_secs.ceil();
    if !seconds.is_finite() || seconds < 1.0 {
        return Err(CoreError::ProbeParse(format!(
            "cannot compute a bitrate for a duration of {duration_secs} seconds"
        )));
    }

    let bits = u128::from(target_bytes) * 8;
    let bitrate = bits / seconds as u128;
    Ok(u64::try_from(bitrate).unwrap_or(u64::MAX))
}

impl Operation for CompressToTargetSize {
    fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTOR
    }

    fn prepare(&self, input: &Path, probe: &dyn MediaProbe) -> CoreResult<Prepared> {
        let info = probe.probe(input)?;
        let bitrate = target_bitrate(self.target_bytes, info.duration_secs)?;
        log::debug!(
            "{}: {} over {:.2}s -> {} bits/s",
            input.display(),
            format_bytes(self.target_bytes),
            info.duration_secs,
            bitrate
        );

        let bitrate = bitrate.to_string();
        let rate = bitrate.as_str();
        let output = self.output_path(input)?;
        let job = Job::new(
            input,
            output,
            [
                "-c:v", "libx264", "-b:v", rate, "-minrate", rate, "-maxrate", rate, "-bufsize",
                rate,
            ],
        );

        if self.target_bytes > info.size_bytes {
            let confirmation = Confirmation {
                input: input.to_path_buf(),
                reason: format!(
                    "Desired size ({}) greater than original file size ({})",
                    format_bytes(self.target_bytes),
                    format_bytes(info.size_bytes)
                ),
                question: "Process anyway?".to_string(),
            };
            return Ok(Prepared::NeedsConfirmation { job, confirmation });
        }

        Ok(Prepared::Ready(job))
    }
}
