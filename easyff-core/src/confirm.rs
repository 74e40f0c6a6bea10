//! Confirmation requests raised while preparing a job.
//!
//! Operations never talk to the terminal. When a job needs the user's
//! approval (for example a target size larger than the source) the operation
//! returns a [`Confirmation`] and the caller decides how to answer it through
//! a [`Confirmer`].

use std::path::PathBuf;

/// A yes/no question about one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// The file the question is about
    pub input: PathBuf,
    /// Why confirmation is needed, e.g. "Desired size greater than original file size"
    pub reason: String,
    /// The question to ask, e.g. "Process anyway?"
    pub question: String,
}

/// Resolves confirmation requests.
pub trait Confirmer {
    /// Returns true to go ahead with the job.
    fn confirm(&self, request: &Confirmation) -> bool;
}

/// Answers every request the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, request: &Confirmation) -> bool {
        log::debug!(
            "Answering \"{}\" for {} with {}",
            request.question,
            request.input.display(),
            if self.0 { "yes" } else { "no" }
        );
        self.0
    }
}
