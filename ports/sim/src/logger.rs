//! Terminal logger
//!
//! `log` backend printing a wall-clock timestamp, a coloured level tag and
//! the record target to stderr.

use std::io::Write;
use std::str::FromStr;

use chrono::Local;
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::{SimError, SimResult};

struct TerminalLogger {
    level: LevelFilter,
}

impl Log for TerminalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        let _ = writeln!(std::io::stderr(), "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".bright_red().bold(),
        Level::Warn => "WARN ".bright_yellow(),
        Level::Info => "INFO ".bright_green(),
        Level::Debug => "DEBUG".bright_blue(),
        Level::Trace => "TRACE".bright_black(),
    }
}

fn format_line(record: &Record) -> String {
    format!(
        "{} {} {} {}",
        Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
        level_tag(record.level()),
        record.target().cyan(),
        record.args()
    )
}

/// Parse a level name such as `info` or `trace`
pub fn parse_level(name: &str) -> SimResult<LevelFilter> {
    LevelFilter::from_str(name).map_err(|_| SimError::LogLevel(name.to_string()))
}

/// Install the terminal logger as the global `log` backend
pub fn init(level: LevelFilter) -> SimResult<()> {
    log::set_boxed_logger(Box::new(TerminalLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::Warn);
        assert!(matches!(parse_level("loud"), Err(SimError::LogLevel(name)) if name == "loud"));
    }
}
