//! The dispatcher: resolves what to run, runs it over every file and
//! reports the outcome.
//!
//! Anything missing from the command line (command, files, extra argument)
//! is asked for when a user is at the terminal. Without one, a missing or
//! unusable selection ends the run with [`EXIT_USAGE`] before any file is
//! touched.

use crate::cli::Cli;
use crate::progress::SpinnerTranscoder;
use crate::terminal::{Prompter, TerminalConfirmer, is_attended};

use anyhow::{Context, Result};
use console::style;
use easyff_core::{
    Confirmer, FfmpegTranscoder, FfprobeExecutor, FileOutcome, FixedAnswer, OperationRegistry,
    RunConfigBuilder, RunSummary, Toolchain, calculate_size_reduction, check_dependency,
    format_bytes, format_duration, process_files,
};

use std::cell::RefCell;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code for an unknown command or an unusable selection.
pub const EXIT_USAGE: u8 = 2;

const FILES_QUESTION: &str = "Files to process? (Please surround each in \"quotes\")";

/// Runs the CLI and returns the process exit code.
///
/// # Errors
///
/// Setup failures (missing ffmpeg or ffprobe, unreadable terminal input).
/// Per-file failures are part of the summary, not errors.
pub fn run(cli: Cli) -> Result<ExitCode> {
    println!(
        "{}",
        style(format!("<<easyff v{}>>", env!("CARGO_PKG_VERSION"))).bold()
    );
    log::debug!("Arguments: {cli:?}");

    let prompter = is_attended().then(|| RefCell::new(Prompter::stdio()));
    dispatch(cli, prompter.as_ref())
}

/// Everything after the banner, with an optional prompter for the
/// interactive parts.
pub fn dispatch<R: BufRead, W: Write>(
    cli: Cli,
    prompter: Option<&RefCell<Prompter<R, W>>>,
) -> Result<ExitCode> {
    let registry = OperationRegistry::standard();

    // --- Command ---
    let name = match cli.command.as_deref() {
        Some(name) if registry.descriptor(name).is_ok() => name.to_string(),
        Some(name) => {
            eprintln!("{} Unknown command \"{}\"", style("Error:").red().bold().for_stderr(), name);
            print_supported_commands(&registry);
            return Ok(ExitCode::from(EXIT_USAGE));
        }
        None => match prompter {
            Some(p) => p
                .borrow_mut()
                .ask_choice("Command to run?", &registry.names())
                .context("Failed to read the command")?
                .to_string(),
            None => {
                eprintln!("{} No command given", style("Error:").red().bold().for_stderr());
                print_supported_commands(&registry);
                return Ok(ExitCode::from(EXIT_USAGE));
            }
        },
    };
    let descriptor = registry.descriptor(&name)?;

    // --- Files ---
    let files: Vec<PathBuf> = if !cli.files.is_empty() {
        cli.files.clone()
    } else if let Some(p) = prompter {
        p.borrow_mut()
            .ask_files(FILES_QUESTION)
            .context("Failed to read the file list")?
            .into_iter()
            .map(PathBuf::from)
            .collect()
    } else {
        eprintln!("{} No files given", style("Error:").red().bold().for_stderr());
        return Ok(ExitCode::from(EXIT_USAGE));
    };

    // --- Extra argument ---
    let mut argument = cli.arguments.clone();
    if let Some(spec) = descriptor.extra_argument {
        let usable = argument.as_deref().is_some_and(spec.validator);
        if let (false, Some(p)) = (usable, prompter) {
            if let Some(given) = &argument {
                log::warn!("\"{given}\" is not a valid argument for \"{name}\"");
            }
            let answer = p
                .borrow_mut()
                .ask_validated(spec.prompt, spec.validator)
                .context("Failed to read the command argument")?;
            argument = Some(answer);
        }
    }

    let operation = match registry.build(&name, argument.as_deref()) {
        Ok(operation) => operation,
        Err(e) if e.is_argument_error() => {
            eprintln!("{} {}", style("Error:").red().bold().for_stderr(), e);
            if let Some(prompt) = descriptor.extra_argument_prompt() {
                eprintln!("Expected: {prompt}");
            }
            return Ok(ExitCode::from(EXIT_USAGE));
        }
        Err(e) => return Err(e.into()),
    };

    let config = RunConfigBuilder::new()
        .debug(cli.debug)
        .threads(cli.threads.unwrap_or_else(easyff_core::config::available_threads))
        .maybe_extra_argument(argument)
        .build();
    log::debug!("Running \"{}\" with {} thread(s)", operation.name(), config.threads);

    // --- External tools ---
    let paths = cli.tool_paths();
    check_dependency(&paths.ffmpeg)
        .with_context(|| format!("ffmpeg is required (looked for \"{}\")", paths.ffmpeg.display()))?;
    check_dependency(&paths.ffprobe)
        .with_context(|| format!("ffprobe is required (looked for \"{}\")", paths.ffprobe.display()))?;

    let transcoder = SpinnerTranscoder::new(FfmpegTranscoder::new(&paths.ffmpeg));
    let probe = FfprobeExecutor::new(&paths.ffprobe);
    let tools = Toolchain {
        transcoder: &transcoder,
        probe: &probe,
    };

    let always_yes = FixedAnswer(true);
    let always_no = FixedAnswer(false);
    let terminal_confirmer;
    let confirmer: &dyn Confirmer = match (cli.yes, prompter) {
        (true, _) => &always_yes,
        (false, Some(p)) => {
            terminal_confirmer = TerminalConfirmer::new(p);
            &terminal_confirmer
        }
        (false, None) => &always_no,
    };

    // --- Run ---
    let summary = process_files(operation.as_ref(), &files, &config, tools, confirmer);
    print_summary(&summary);

    if cli.delete_originals {
        offer_to_delete_originals(&summary, cli.yes, prompter)?;
    }

    println!("All done!");
    Ok(if summary.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_supported_commands(registry: &OperationRegistry) {
    eprintln!("Supported commands:");
    for name in registry.names() {
        eprintln!("  \"{name}\"");
    }
}

/// Plain-text summary lines, one per file plus a totals line.
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .reports
        .iter()
        .map(|report| {
            let input = display_name(&report.input);
            match &report.outcome {
                FileOutcome::Succeeded {
                    output,
                    input_size,
                    output_size,
                    elapsed,
                } => {
                    let mut line = format!(
                        "{} -> {} in {}",
                        input,
                        display_name(output),
                        format_duration(*elapsed)
                    );
                    if let (Some(before), Some(after)) = (input_size, output_size) {
                        line.push_str(&format!(
                            " ({} -> {}, reduced by {}%)",
                            format_bytes(*before),
                            format_bytes(*after),
                            calculate_size_reduction(*before, *after)
                        ));
                    }
                    line
                }
                FileOutcome::Skipped { reason } => format!("{input} skipped: {reason}"),
                FileOutcome::Failed { error } => format!("{input} failed: {error}"),
            }
        })
        .collect();

    lines.push(format!(
        "{} succeeded, {} skipped, {} failed in {}",
        summary.succeeded(),
        summary.skipped(),
        summary.failed(),
        format_duration(summary.elapsed)
    ));
    lines
}

fn print_summary(summary: &RunSummary) {
    if summary.reports.is_empty() {
        return;
    }
    println!();
    println!("{}", style("===== Summary =====").cyan().bold());

    let lines = summary_lines(summary);
    for (line, report) in lines.iter().zip(&summary.reports) {
        let marker = match report.outcome {
            FileOutcome::Succeeded { .. } => style("✓").green(),
            FileOutcome::Skipped { .. } => style("-").yellow(),
            FileOutcome::Failed { .. } => style("✗").red(),
        };
        println!("  {marker} {line}");
    }
    if let Some(totals) = lines.last() {
        println!("{}", style(totals).bold());
    }
}

/// Deletes the inputs whose operation succeeded, after one confirmation.
fn offer_to_delete_originals<R: BufRead, W: Write>(
    summary: &RunSummary,
    assume_yes: bool,
    prompter: Option<&RefCell<Prompter<R, W>>>,
) -> Result<()> {
    let originals = summary.successful_inputs();
    if originals.is_empty() {
        return Ok(());
    }

    let question = format!("Delete {} original file(s)?", originals.len());
    let confirmed = if assume_yes {
        true
    } else if let Some(p) = prompter {
        p.borrow_mut()
            .ask_yes_no(&question, false)
            .context("Failed to read the answer")?
    } else {
        log::warn!("Not deleting originals without confirmation (use --yes)");
        false
    };
    if !confirmed {
        return Ok(());
    }

    for original in originals {
        match fs::remove_file(original) {
            Ok(()) => log::info!("Deleted \"{}\"", original.display()),
            Err(e) => log::error!("Failed to delete \"{}\": {}", original.display(), e),
        }
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
