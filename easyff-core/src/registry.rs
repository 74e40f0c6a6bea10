//! The fixed set of operations, keyed by display name.
//!
//! Lookup is an exact, case-sensitive match on the display name. Building an
//! operation goes through its factory, which parses the extra argument, so
//! an unusable argument is rejected before any file is looked at.

use crate::error::{CoreError, CoreResult};
use crate::operations::{
    self, CompressToQuality, CompressToTargetSize, Operation, OperationDescriptor, Remux,
    StripAudio,
};
use std::fmt;

/// Builds an operation from its (optional) extra argument.
pub type OperationFactory = fn(Option<&str>) -> CoreResult<Box<dyn Operation>>;

/// One registered operation.
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    pub descriptor: &'static OperationDescriptor,
    factory: OperationFactory,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.descriptor.name)
            .finish_non_exhaustive()
    }
}

fn build_remux(_: Option<&str>) -> CoreResult<Box<dyn Operation>> {
    Ok(Box::new(Remux))
}

fn build_compress_size(argument: Option<&str>) -> CoreResult<Box<dyn Operation>> {
    Ok(Box::new(CompressToTargetSize::from_argument(argument)?))
}

fn build_compress_quality(argument: Option<&str>) -> CoreResult<Box<dyn Operation>> {
    Ok(Box::new(CompressToQuality::from_argument(argument)?))
}

fn build_strip_audio(_: Option<&str>) -> CoreResult<Box<dyn Operation>> {
    Ok(Box::new(StripAudio))
}

static ENTRIES: [RegistryEntry; 4] = [
    RegistryEntry {
        descriptor: &operations::remux::DESCRIPTOR,
        factory: build_remux,
    },
    RegistryEntry {
        descriptor: &operations::compress_size::DESCRIPTOR,
        factory: build_compress_size,
    },
    RegistryEntry {
        descriptor: &operations::compress_quality::DESCRIPTOR,
        factory: build_compress_quality,
    },
    RegistryEntry {
        descriptor: &operations::strip_audio::DESCRIPTOR,
        factory: build_strip_audio,
    },
];

/// Maps display names to operation factories.
#[derive(Debug, Clone, Copy)]
pub struct OperationRegistry {
    entries: &'static [RegistryEntry],
}

impl OperationRegistry {
    /// The registry of all built-in operations.
    pub fn standard() -> Self {
        Self { entries: &ENTRIES }
    }

    /// Display names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.descriptor.name).collect()
    }

    pub fn entries(&self) -> &'static [RegistryEntry] {
        self.entries
    }

    /// # Errors
    ///
    /// `CoreError::UnknownOperation` when no operation has this exact name.
    pub fn descriptor(&self, name: &str) -> CoreResult<&'static OperationDescriptor> {
        self.entry(name).map(|entry| entry.descriptor)
    }

    /// Builds the named operation with its extra argument.
    ///
    /// # Errors
    ///
    /// `CoreError::UnknownOperation` for an unknown name, or the argument
    /// error from the operation's factory.
    pub fn build(&self, name: &str, argument: Option<&str>) -> CoreResult<Box<dyn Operation>> {
        let entry = self.entry(name)?;
        let operation = (entry.factory)(argument)?;
        log::debug!("Built operation \"{}\"", operation.name());
        Ok(operation)
    }

    fn entry(&self, name: &str) -> CoreResult<&'static RegistryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.descriptor.name == name)
            .ok_or_else(|| CoreError::UnknownOperation(name.to_string()))
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
