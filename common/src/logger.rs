use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, min_level: LogLevel) -> Self {
        Self { prefix, min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn format_line(&self, level: LogLevel, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}] {}", timestamp, prefix, level, message),
            None => format!("[{}][{}] {}", timestamp, level, message),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        // Board rendering owns stdout.
        let _ = writeln!(std::io::stderr(), "{}", self.format_line(level, message));
    }
}

pub fn init_logger(prefix: Option<String>, min_level: LogLevel) {
    LOGGER.get_or_init(|| Logger::new(prefix, min_level));
}

/// Messages sent before `init_logger` are dropped.
pub fn log(level: LogLevel, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, message);
    }
}

pub fn is_enabled(level: LogLevel) -> bool {
    LOGGER.get().is_some_and(|logger| logger.enabled(level))
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled($crate::logger::LogLevel::Debug) {
            $crate::logger::log($crate::logger::LogLevel::Debug, &format!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filtering() {
        let logger = Logger::new(None, LogLevel::Info);
        assert!(logger.enabled(LogLevel::Info));
        assert!(!logger.enabled(LogLevel::Debug));

        let verbose = Logger::new(None, LogLevel::Debug);
        assert!(verbose.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_line_contains_prefix_and_level() {
        let logger = Logger::new(Some("Client".to_string()), LogLevel::Info);
        let line = logger.format_line(LogLevel::Info, "hello");
        assert!(line.contains("[Client][INFO] hello"));
    }

    #[test]
    fn test_line_without_prefix() {
        let logger = Logger::new(None, LogLevel::Debug);
        let line = logger.format_line(LogLevel::Debug, "searching");
        assert!(line.ends_with("[DEBUG] searching"));
    }
}
