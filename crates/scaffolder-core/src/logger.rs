//! Leveled console logger
//!
//! `error` and `warn` go to stderr, everything else to stdout. `verbose`
//! lines are dropped unless `VERBOSE=true` is set in the environment.

use colored::{ColoredString, Colorize};
use std::fmt;
use std::io::{self, Write};

/// Environment toggle for verbose output
pub const VERBOSE_ENV: &str = "VERBOSE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Error,
    Info,
    Success,
    Warn,
    Verbose,
}

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warn => "WARN",
            Level::Verbose => "VERBOSE",
        }
    }

    fn paint(&self, line: String) -> ColoredString {
        match self {
            Level::Error => line.red(),
            Level::Info => line.blue(),
            Level::Success => line.green(),
            Level::Warn => line.yellow(),
            Level::Verbose => line.normal(),
        }
    }

    fn to_stderr(&self) -> bool {
        matches!(self, Level::Error | Level::Warn)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Read the verbose toggle from `VERBOSE`
    pub fn from_env() -> Self {
        Self::new(std::env::var(VERBOSE_ENV).is_ok_and(|v| v == "true"))
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level != Level::Verbose || self.verbose
    }

    /// Formatted line for `level`, or `None` when the level is suppressed
    pub fn format(&self, level: Level, message: &str) -> Option<String> {
        self.is_enabled(level)
            .then(|| level.paint(format!("{}: {}", level.label(), message)).to_string())
    }

    /// Write one line to `out`. Returns whether anything was written.
    pub fn write_to<W: Write>(&self, out: &mut W, level: Level, message: &str) -> io::Result<bool> {
        match self.format(level, message) {
            Some(line) => {
                writeln!(out, "{}", line)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn log(&self, level: Level, message: &str) {
        // Console write failures are not actionable
        let _ = if level.to_stderr() {
            self.write_to(&mut io::stderr().lock(), level, message)
        } else {
            self.write_to(&mut io::stdout().lock(), level, message)
        };
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(Level::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(Level::Verbose, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_carries_level_label() {
        let logger = Logger::new(false);
        let line = logger.format(Level::Error, "boom").unwrap();
        assert!(line.contains("ERROR: boom"));
        let line = logger.format(Level::Success, "done").unwrap();
        assert!(line.contains("SUCCESS: done"));
    }

    #[test]
    fn test_verbose_suppressed_by_default() {
        let logger = Logger::new(false);
        assert!(logger.format(Level::Verbose, "detail").is_none());

        let mut out = Vec::new();
        assert!(!logger.write_to(&mut out, Level::Verbose, "detail").unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn test_verbose_enabled() {
        let logger = Logger::new(true);
        let line = logger.format(Level::Verbose, "detail").unwrap();
        assert!(line.contains("VERBOSE: detail"));
    }

    #[test]
    fn test_write_to_emits_one_line() {
        let logger = Logger::default();
        let mut out = Vec::new();
        assert!(logger.write_to(&mut out, Level::Warn, "careful").unwrap());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("WARN: careful"));
    }

    #[test]
    fn test_stream_routing() {
        assert!(Level::Error.to_stderr());
        assert!(Level::Warn.to_stderr());
        assert!(!Level::Info.to_stderr());
        assert!(!Level::Success.to_stderr());
        assert!(!Level::Verbose.to_stderr());
    }
}
