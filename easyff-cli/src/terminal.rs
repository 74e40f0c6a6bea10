// ============================================================================
// easyff-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL INPUT: Interactive prompts
//
// Everything the CLI asks the user goes through `Prompter`: picking a
// command, entering files, supplying an extra argument and yes/no
// confirmations. The prompter is generic over its reader and writer so the
// question loops can be tested without a terminal.
//
// Prompts are only shown when `is_attended()` is true. In a pipe or CI job
// the dispatcher never constructs a prompter.

use console::{Term, style};
use easyff_core::{Confirmation, Confirmer};
use std::cell::RefCell;
use std::io::{self, BufRead, IsTerminal, StdinLock, Write};

/// True when both stdin and stdout are attached to a terminal.
pub fn is_attended() -> bool {
    console::user_attended() && io::stdin().is_terminal()
}

/// Asks questions on `output` and reads answers line by line from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Term> {
    /// Prompter on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), Term::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Lists `options` numbered from 1 and returns the chosen one.
    ///
    /// An answer is accepted as a number or as the option text in any case.
    pub fn ask_choice<'a>(&mut self, question: &str, options: &[&'a str]) -> io::Result<&'a str> {
        loop {
            writeln!(self.output, "{}", style(question).bold())?;
            for (index, option) in options.iter().enumerate() {
                writeln!(self.output, "{}> {}", index + 1, option)?;
            }
            let answer = self.read_answer("> ")?;
            if let Some(choice) = resolve_choice(&answer, options) {
                return Ok(choice);
            }
        }
    }

    /// Asks until `validator` accepts the answer.
    pub fn ask_validated(&mut self, question: &str, validator: fn(&str) -> bool) -> io::Result<String> {
        loop {
            writeln!(self.output, "{}", style(question).bold())?;
            let answer = self.read_answer("> ")?;
            if validator(&answer) {
                return Ok(answer);
            }
            writeln!(self.output, "{}", style("Invalid input, try again.").yellow())?;
        }
    }

    /// Asks for a file list until it is non-empty with balanced quotes.
    pub fn ask_files(&mut self, question: &str) -> io::Result<Vec<String>> {
        loop {
            writeln!(self.output, "{}", style(question).bold())?;
            let answer = self.read_answer("> ")?;
            match split_file_list(&answer) {
                Some(files) if !files.is_empty() => return Ok(files),
                Some(_) => {}
                None => writeln!(self.output, "{}", style("Unbalanced quotes, try again.").yellow())?,
            }
        }
    }

    /// Asks a yes/no question. An empty answer picks `default`.
    pub fn ask_yes_no(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[y]" } else { "[n]" };
        let prompt = format!("{question} {hint}: ");
        loop {
            let answer = self.read_answer(&prompt)?;
            if let Some(yes) = parse_yes_no(&answer, default) {
                return Ok(yes);
            }
        }
    }

    fn read_answer(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Matches an answer against numbered options.
pub fn resolve_choice<'a>(answer: &str, options: &[&'a str]) -> Option<&'a str> {
    let answer = answer.trim();
    if let Some(option) = options.iter().find(|option| option.eq_ignore_ascii_case(answer)) {
        return Some(*option);
    }
    answer
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .and_then(|index| options.get(index).copied())
}

/// `Some(true)` for answers starting with y, `Some(false)` for n, the
/// default for an empty answer and `None` otherwise.
pub fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        None => Some(default),
        Some('y') => Some(true),
        Some('n') => Some(false),
        Some(_) => None,
    }
}

/// Splits a typed file list into paths.
///
/// Words are separated by whitespace; single or double quotes group words
/// into one path and are removed. Returns `None` for an unterminated quote.
pub fn split_file_list(line: &str) -> Option<Vec<String>> {
    let mut files = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    files.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return None;
    }
    if in_word {
        files.push(current);
    }
    Some(files)
}

/// [`Confirmer`] that asks on the terminal, defaulting to no.
pub struct TerminalConfirmer<'a, R, W> {
    prompter: &'a RefCell<Prompter<R, W>>,
}

impl<'a, R, W> TerminalConfirmer<'a, R, W> {
    pub fn new(prompter: &'a RefCell<Prompter<R, W>>) -> Self {
        Self { prompter }
    }
}

impl<R: BufRead, W: Write> Confirmer for TerminalConfirmer<'_, R, W> {
    fn confirm(&self, request: &Confirmation) -> bool {
        match self.prompter.borrow_mut().ask_yes_no(&request.question, false) {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Could not read an answer ({e}), assuming no");
                false
            }
        }
    }
}
