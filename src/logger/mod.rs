//! Minimal tag + level colorized console logger: an enum of named
//! tags with a `colored`-based `Display`, and a level-gated `log` function.

use colored::Colorize;
use once_cell::sync::OnceCell;
use std::fmt;

mod level;
pub use level::LogLevel;

static MIN_LEVEL: OnceCell<LogLevel> = OnceCell::new();

/// Subsystems that emit log lines. Kept small and specific to this indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    Ingestion,
    Worker,
    Rpc,
    Decode,
    Pump,
    Persistence,
    Recovery,
    System,
    Token,
}

impl fmt::Display for LogTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogTag::Ingestion => "INGEST".blue(),
            LogTag::Worker => "WORKER".cyan(),
            LogTag::Rpc => "RPC".magenta(),
            LogTag::Decode => "DECODE".yellow(),
            LogTag::Pump => "PUMP".green(),
            LogTag::Persistence => "PERSIST".purple(),
            LogTag::Recovery => "RECOVER".red(),
            LogTag::System => "SYSTEM".white(),
            LogTag::Token => "TOKEN".bright_blue(),
        };
        write!(f, "{}", s)
    }
}

/// Sets the minimum level printed. Call once at startup; later calls are ignored.
pub fn init(level: LogLevel) {
    let _ = MIN_LEVEL.set(level);
}

fn min_level() -> LogLevel {
    *MIN_LEVEL.get().unwrap_or(&LogLevel::Info)
}

pub fn log(level: LogLevel, tag: LogTag, msg: &str) {
    if level < min_level() {
        return;
    }
    let now = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    println!("{} [{}] {} {}", now, level, tag, msg);
}

#[macro_export]
macro_rules! log_debug {
    ($tag:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Debug, $tag, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($tag:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, $tag, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($tag:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Warn, $tag, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($tag:expr, $($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Error, $tag, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_display_is_stable() {
        assert_eq!(format!("{}", LogTag::Rpc).contains("RPC"), true);
    }
}
