use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static WARNED_UNINITIALIZED: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }

    pub fn log(&self, target: LogTarget, file: &str, line: u32, message: &str) {
        let formatted = self.format_line(file, line, message);
        match target {
            LogTarget::Stdout => println!("{}", formatted),
            LogTarget::Stderr => eprintln!("{}", formatted),
        }
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

pub fn log(target: LogTarget, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(target, file, line, message);
    } else if !WARNED_UNINITIALIZED.swap(true, Ordering::Relaxed) {
        eprintln!("Logger not initialized! Call init_logger() first. Messages are dropped.");
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogTarget::Stdout, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogTarget::Stderr, file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories_and_keeps_prefix() {
        let logger = Logger::new(Some("Client".to_string()));
        let line = logger.format_line("common/src/games/snake/snake.rs", 42, "ate food");
        assert!(line.ends_with("[Client][snake.rs:42] ate food"));
    }

    #[test]
    fn test_format_line_without_prefix() {
        let logger = Logger::new(None);
        let line = logger.format_line("C:\\repo\\board.rs", 7, "hello");
        assert!(line.ends_with("[board.rs:7] hello"));
    }

    #[test]
    fn test_logging_before_init_does_not_panic() {
        log(LogTarget::Stdout, file!(), line!(), "ignored");
    }
}
