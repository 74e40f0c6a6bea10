//! FLV to MP4 remux: copy every stream into an MP4 container, keeping
//! timestamps.

use super::{Job, Operation, OperationDescriptor, OutputName, Prepared, copy_flags};
use crate::error::CoreResult;
use crate::external::MediaProbe;
use std::path::Path;

pub static DESCRIPTOR: OperationDescriptor = OperationDescriptor {
    name: "FLV to MP4",
    accepted_extensions: &["flv"],
    extra_argument: None,
    output: OutputName::Extension("mp4"),
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Remux;

impl Operation for Remux {
    fn descriptor(&self) -> &'static OperationDescriptor {
        &DESCRIPTOR
    }

    fn prepare(&self, input: &Path, _probe: &dyn MediaProbe) -> CoreResult<Prepared> {
        let output = self.output_path(input)?;
        Ok(Prepared::Ready(Job::new(input, output, copy_flags(&[]))))
    }
}
