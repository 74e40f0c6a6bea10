//! Remove Audio: copy every stream except audio into `noaudio_<name>`.

use super::{Job, Operation, OperationDescriptor, OutputName, Prepared, copy_flags};
use crate::error::CoreResult;
use crate::external::MediaProbe;
use std::path::Path;

pub static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
    name: "Remove Audio",
    accepted_extensions: &["flv", "mp4", "mkv", "mov"],
    extra_argument: None,
    output: OutputName::Prefix("noaudio_"),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct StripAudio;

impl Operation for StripAudio {
    fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTOR
    }

    fn prepare(&self, input: &Path, _probe: &dyn MediaProbe) -> CoreResult<Prepared> {
        let output = self.output_path(input)?;
        Ok(Prepared::Ready(Job::new(input, output, copy_flags(&["-an"]))))
    }
}
