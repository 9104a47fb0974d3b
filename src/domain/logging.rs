use derive_more::Display;
use once_cell::sync::OnceCell;

/// Severity, ordered from chattiest to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace,
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = "INFO")]
    Info,
    #[display(fmt = "WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer and unit that produced an entry
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    /// Entry stamped with the installed clock
    pub fn stamped(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
        }
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Sink for viewer diagnostics. Implementors only write `log`; the
/// leveled helpers all funnel through `emit`, which consults `accepts`
/// before an entry is built.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn accepts(&self, _level: LogLevel) -> bool {
        true
    }

    fn emit(&self, level: LogLevel, component: LogComponent, message: &str) {
        if self.accepts(level) {
            self.log(LogEntry::stamped(level, component, message));
        }
    }

    fn trace(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Trace, component, message);
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Debug, component, message);
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Info, component, message);
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Warn, component, message);
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.emit(LogLevel::Error, component, message);
    }
}

type SharedLogger = Box<dyn Logger + Send + Sync>;
type SharedClock = Box<dyn TimeProvider + Send + Sync>;

static LOGGER: OnceCell<SharedLogger> = OnceCell::new();
static CLOCK: OnceCell<SharedClock> = OnceCell::new();

/// First installed logger stays for the life of the process.
pub fn init_logger(logger: SharedLogger) {
    let _ = LOGGER.set(logger);
}

pub fn init_time_provider(clock: SharedClock) {
    let _ = CLOCK.set(clock);
}

/// Installed logger, or a silent one before `init_logger`
pub fn get_logger() -> &'static dyn Logger {
    match LOGGER.get() {
        Some(logger) => logger.as_ref(),
        None => &Silent,
    }
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    match CLOCK.get() {
        Some(clock) => clock.as_ref(),
        None => &TickClock,
    }
}

struct Silent;

impl Logger for Silent {
    fn log(&self, _entry: LogEntry) {}

    fn accepts(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Sequence number standing in for wall time until a clock is installed
struct TickClock;

impl TimeProvider for TickClock {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TICKS: AtomicU64 = AtomicU64::new(0);
        TICKS.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{}", timestamp)
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().emit(
            $crate::domain::logging::LogLevel::$level,
            $component,
            &format!($($arg)*),
        )
    };
}

/// Compiled out of release builds, like `log_debug!`
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::__log_at!(Trace, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::__log_at!(Debug, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!(Info, $component, $($arg)*);
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!(Warn, $component, $($arg)*);
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::__log_at!(Error, $component, $($arg)*);
    };
}
