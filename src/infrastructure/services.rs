use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};
use std::cell::RefCell;

/// Leveled console sink: browser console on wasm32, stderr elsewhere
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    pub fn format_log_entry(entry: &LogEntry) -> String {
        format!(
            "[{}] {:>5} {} | {}",
            get_time_provider().format_timestamp(entry.timestamp),
            entry.level.to_string(),
            entry.component,
            entry.message
        )
    }
}

impl Logger for ConsoleLogger {
    fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, entry: LogEntry) {
        let formatted = Self::format_log_entry(&entry);

        #[cfg(target_arch = "wasm32")]
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted.into()),
            LogLevel::Info => web_sys::console::info_1(&formatted.into()),
            LogLevel::Warn => web_sys::console::warn_1(&formatted.into()),
            LogLevel::Error => web_sys::console::error_1(&formatted.into()),
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", formatted);
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<LogEntry>> = const { RefCell::new(Vec::new()) };
}

/// Keeps entries in memory, one buffer per thread, so parallel tests can
/// inspect only what they logged themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryLogger;

impl MemoryLogger {
    /// Entries logged on the current thread since the last call
    pub fn take_captured() -> Vec<LogEntry> {
        CAPTURED.with(|buf| std::mem::take(&mut *buf.borrow_mut()))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        CAPTURED.with(|buf| buf.borrow_mut().push(entry));
    }
}

/// Wall clock in milliseconds
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    #[cfg(target_arch = "wasm32")]
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn current_timestamp(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let millis = timestamp % 1_000;
        let seconds = (timestamp / 1_000) % 60;
        let minutes = (timestamp / 60_000) % 60;
        let hours = (timestamp / 3_600_000) % 24;
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}
