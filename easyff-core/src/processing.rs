// ============================================================================
// easyff-core/src/processing.rs
// ============================================================================
//
// PROCESSING: Running one operation over a list of files
//
// Files are handled strictly one after another. A failure on one file is
// recorded and the loop moves on; the run always finishes its list and
// returns a `RunSummary` with one report per input.
//
// Output collisions: a file is skipped when its derived output path is the
// input itself, any input of this run, or an output already produced by
// this run. Files left on disk by earlier runs are overwritten.
//
// Paths are compared after resolving them to absolute, symlink-free form,
// so `clip.mp4`, `./clip.mp4` and `/videos/clip.mp4` are the same file.

use crate::config::RunConfig;
use crate::confirm::Confirmer;
use crate::error::CoreError;
use crate::operations::{Operation, Toolchain};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome {
    Succeeded {
        output: PathBuf,
        input_size: Option<u64>,
        output_size: Option<u64>,
        elapsed: Duration,
    },
    /// Not processed: failed validation, declined, or output collision.
    Skipped { reason: CoreError },
    Failed { error: CoreError },
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

/// Reports for every file of a run, in input order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Succeeded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Inputs whose operation succeeded.
    pub fn successful_inputs(&self) -> Vec<&Path> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Succeeded { .. }))
            .map(|r| r.input.as_path())
            .collect()
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Runs `operation` over `files` sequentially.
///
/// Each file is validated before anything else happens; an invalid file is
/// skipped without probing or running ffmpeg.
pub fn process_files(
    operation: &dyn Operation,
    files: &[PathBuf],
    config: &RunConfig,
    tools: Toolchain<'_>,
    confirmer: &dyn Confirmer,
) -> RunSummary {
    let run_start = Instant::now();
    let inputs: HashSet<PathBuf> = files.iter().map(|file| resolved(file)).collect();
    let mut produced: HashSet<PathBuf> = HashSet::new();
    let mut reports = Vec::with_capacity(files.len());

    for (index, input) in files.iter().enumerate() {
        log::debug!("File {}/{}: {}", index + 1, files.len(), input.display());
        let outcome = process_one(operation, input, config, tools, confirmer, &inputs, &mut produced);
        reports.push(FileReport {
            input: input.clone(),
            outcome,
        });
    }

    let summary = RunSummary {
        reports,
        elapsed: run_start.elapsed(),
    };
    log::debug!(
        "Run finished: {} succeeded, {} skipped, {} failed",
        summary.succeeded(),
        summary.skipped(),
        summary.failed()
    );
    summary
}

fn process_one(
    operation: &dyn Operation,
    input: &Path,
    config: &RunConfig,
    tools: Toolchain<'_>,
    confirmer: &dyn Confirmer,
    inputs: &HashSet<PathBuf>,
    produced: &mut HashSet<PathBuf>,
) -> FileOutcome {
    if let Err(reason) = operation.check_input(input) {
        log::warn!("{reason}. Ignoring...");
        return FileOutcome::Skipped { reason };
    }

    let output = match operation.output_path(input) {
        Ok(output) => output,
        Err(error) => return FileOutcome::Failed { error },
    };
    let output_key = resolved(&output);
    if output_key == resolved(input) || inputs.contains(&output_key) || produced.contains(&output_key)
    {
        let reason = CoreError::OutputCollision(output);
        log::warn!("{reason}. Ignoring \"{}\"...", input.display());
        return FileOutcome::Skipped { reason };
    }

    log::info!("Processing file \"{}\"...", input.display());
    let file_start = Instant::now();

    match operation.execute(input, config, tools, confirmer) {
        Ok(output) => {
            log::info!("Done! Saved to \"{}\"", output.display());
            produced.insert(resolved(&output));
            FileOutcome::Succeeded {
                input_size: file_size(input),
                output_size: file_size(&output),
                output,
                elapsed: file_start.elapsed(),
            }
        }
        Err(reason @ CoreError::UserDeclined(_)) => {
            log::warn!("Skipping \"{}\"", input.display());
            FileOutcome::Skipped { reason }
        }
        Err(error) => {
            log::error!("Failed to process \"{}\": {}", input.display(), error);
            FileOutcome::Failed { error }
        }
    }
}

/// Absolute, symlink-free form of `path` for identity comparisons.
///
/// A path that does not exist yet keeps its file name under its resolved
/// parent directory. When even the parent cannot be resolved the path is
/// only made absolute.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(path) = fs::canonicalize(path) {
        return path;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}

fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|m| m.len())
}
