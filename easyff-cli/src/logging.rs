// ============================================================================
// easyff-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup for the CLI
//
// The core library only talks to the `log` facade. This module installs
// `env_logger` as the backend with a compact format: info lines are printed
// as-is, every other level gets a coloured tag.
//
// USAGE:
// - default: info
// - --debug: debug
// - RUST_LOG overrides both, e.g. RUST_LOG=easyff_core=trace

use console::{StyledObject, style};
use log::{Level, LevelFilter};
use std::io::Write;

/// Level used when `RUST_LOG` is not set.
pub fn default_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Coloured tag printed in front of a record, `None` for plain info lines.
pub fn level_tag(level: Level) -> Option<StyledObject<&'static str>> {
    let tag = match level {
        Level::Error => style("[ERROR]").red().bold(),
        Level::Warn => style("[WARN]").yellow(),
        Level::Info => return None,
        Level::Debug => style("[DEBUG]").magenta(),
        Level::Trace => style("[TRACE]").blue(),
    };
    Some(tag.for_stderr())
}

/// Installs the logger. Calling it twice is harmless.
pub fn init(debug: bool) {
    let result = env_logger::Builder::new()
        .filter_level(default_level(debug))
        .parse_env(env_logger::Env::default())
        .format(|buf, record| match level_tag(record.level()) {
            Some(tag) => writeln!(buf, "{} {}", tag, record.args()),
            None => writeln!(buf, "{}", record.args()),
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized with level: {}", log::max_level());
    }
}
