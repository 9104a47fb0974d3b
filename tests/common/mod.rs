#![allow(dead_code)]

use candlestick_viewer::domain::logging::{LogEntry, LogLevel, init_logger};
use candlestick_viewer::infrastructure::services::MemoryLogger;

pub const AAPL_CSV: &str = "date,open,high,low,close,adjclose,volume\n\
2024-01-01,100,105,99,102,102,1000\n\
2024-01-02,102,108,101,107,107,1200\n";

/// Route logs of the current thread into memory and drop anything left over
pub fn capture_logs() {
    init_logger(Box::new(MemoryLogger));
    MemoryLogger::take_captured();
}

pub fn captured_at(level: LogLevel) -> Vec<LogEntry> {
    MemoryLogger::take_captured()
        .into_iter()
        .filter(|entry| entry.level == level)
        .collect()
}
