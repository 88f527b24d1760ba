//! Early logging with configurable log levels.
//!
//! Output goes to whatever byte sink was registered with [`register_console`]
//! (the UART, on hardware). Until one is registered, messages are dropped.
//!
//! The console slot and the level filter are globals, so nothing may log
//! before `.bss` has been zeroed.
//!
//! Log levels are similar to log4j:
//! - TRACE: Fine-grained debugging information
//! - DEBUG: Debugging information
//! - INFO: Informational messages
//! - WARN: Warning messages
//! - ERROR: Error messages

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Parse a `LOG=` value; anything unrecognised means INFO.
    pub fn from_config(value: Option<&str>) -> LogLevel {
        match value {
            Some("ERROR") => LogLevel::Error,
            Some("WARN") => LogLevel::Warn,
            Some("INFO") => LogLevel::Info,
            Some("DEBUG") => LogLevel::Debug,
            Some("TRACE") => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "[TRACE] ",
            LogLevel::Debug => "[DEBUG] ",
            LogLevel::Info => "[INFO]  ",
            LogLevel::Warn => "[WARN]  ",
            LogLevel::Error => "[ERROR] ",
        }
    }
}

/// An "emit one byte" capability.
pub trait ByteSink {
    fn write_byte(&self, byte: u8);
}

/// Global log level filter. Messages below this level are suppressed.
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

// SAFETY: only written during single-threaded bring-up (after .bss is
// zeroed, before the handoff) and read by the logging path afterwards.
static mut CONSOLE: Option<&'static dyn ByteSink> = None;

/// Apply the build-time level (`LOG=...` when the image was compiled).
pub fn init() {
    set_log_level(LogLevel::from_config(option_env!("LOG")));
}

/// Get the current log level threshold.
pub fn get_log_level() -> LogLevel {
    match LOG_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Trace,
        1 => LogLevel::Debug,
        2 => LogLevel::Info,
        3 => LogLevel::Warn,
        _ => LogLevel::Error,
    }
}

/// Set the log level threshold. Messages below this level will be suppressed.
pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Check if a message at the given level should be logged.
#[inline]
pub fn should_log(level: LogLevel) -> bool {
    level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn register_console(sink: &'static dyn ByteSink) {
    unsafe {
        CONSOLE = Some(sink);
    }
}

pub fn console() -> Option<&'static dyn ByteSink> {
    unsafe { CONSOLE }
}

#[cfg(test)]
pub(crate) fn unregister_console() {
    unsafe {
        CONSOLE = None;
    }
}

/// Raw byte out, for the runtime's own character output.
pub fn putchar(byte: u8) {
    if let Some(sink) = console() {
        sink.write_byte(byte);
    }
}

/// `fmt::Write` front end to the registered console. Expands `\n` to `\r\n`.
pub struct Console;

impl fmt::Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let Some(sink) = console() else {
            return Ok(());
        };
        for b in s.bytes() {
            if b == b'\n' {
                sink.write_byte(b'\r');
            }
            sink.write_byte(b);
        }
        Ok(())
    }
}

/// Internal macro for logging with level filtering.
#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        let level: $crate::logging::LogLevel = $level;
        if $crate::logging::should_log(level) {
            use core::fmt::Write;
            let mut out = $crate::logging::Console;
            let _ = out.write_str(level.label());
            let _ = write!(out, $($arg)*);
            let _ = out.write_str("\n");
        }
    }};
}

/// Log a trace-level message (finest granularity).
#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Trace, $($arg)*)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Debug, $($arg)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Info, $($arg)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Warn, $($arg)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! kerror {
    ($($arg:tt)*) => {
        $crate::klog!($crate::logging::LogLevel::Error, $($arg)*)
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};
    use std::vec::Vec;

    static CONSOLE_LOCK: Mutex<()> = Mutex::new(());

    /// Held by tests that log or touch the console slot, so they run one at
    /// a time. Dropping it puts back the level it found and clears the slot.
    pub(crate) struct ConsoleGuard {
        level: LogLevel,
        _lock: MutexGuard<'static, ()>,
    }

    impl Drop for ConsoleGuard {
        fn drop(&mut self) {
            set_log_level(self.level);
            unregister_console();
        }
    }

    pub(crate) fn console_guard() -> ConsoleGuard {
        let lock = CONSOLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        ConsoleGuard {
            level: get_log_level(),
            _lock: lock,
        }
    }

    pub(crate) struct Capture(Mutex<Vec<u8>>);

    impl Capture {
        pub(crate) const fn new() -> Self {
            Capture(Mutex::new(Vec::new()))
        }

        pub(crate) fn take(&self) -> std::string::String {
            let bytes = core::mem::take(&mut *self.0.lock().unwrap());
            std::string::String::from_utf8(bytes).unwrap()
        }
    }

    impl ByteSink for Capture {
        fn write_byte(&self, byte: u8) {
            self.0.lock().unwrap().push(byte);
        }
    }

    static SINK: Capture = Capture::new();

    #[test]
    fn test_level_parse() {
        assert_eq!(LogLevel::from_config(Some("TRACE")), LogLevel::Trace);
        assert_eq!(LogLevel::from_config(Some("ERROR")), LogLevel::Error);
        assert_eq!(LogLevel::from_config(Some("verbose")), LogLevel::Info);
        assert_eq!(LogLevel::from_config(None), LogLevel::Info);
    }

    #[test]
    fn test_level_filter() {
        let _g = console_guard();
        set_log_level(LogLevel::Warn);
        assert_eq!(get_log_level(), LogLevel::Warn);
        assert!(!should_log(LogLevel::Info));
        assert!(should_log(LogLevel::Warn));
        assert!(should_log(LogLevel::Error));
        set_log_level(LogLevel::Info);
    }

    #[test]
    fn test_messages_reach_console_with_crlf() {
        let _g = console_guard();
        register_console(&SINK);
        set_log_level(LogLevel::Info);
        SINK.take();

        crate::kinfo!("tick {} ns", 25);
        crate::kdebug!("hidden");
        crate::kerror!("a\nb");

        assert_eq!(
            SINK.take(),
            "[INFO]  tick 25 ns\r\n[ERROR] a\r\nb\r\n"
        );
        unregister_console();
    }

    #[test]
    fn test_putchar_passes_bytes_through() {
        let _g = console_guard();
        register_console(&SINK);
        SINK.take();

        for &b in b"ok\n" {
            putchar(b);
        }
        assert_eq!(SINK.take(), "ok\n");
        unregister_console();
    }

    #[test]
    fn test_guard_restores_level_and_console() {
        let before = get_log_level_locked();
        let other = if before == LogLevel::Error {
            LogLevel::Trace
        } else {
            LogLevel::Error
        };
        {
            let _g = console_guard();
            set_log_level(other);
            register_console(&SINK);
        }

        let _g = console_guard();
        assert_eq!(get_log_level(), before);
        assert!(console().is_none());
    }

    fn get_log_level_locked() -> LogLevel {
        let _g = console_guard();
        get_log_level()
    }

    #[test]
    fn test_no_console_drops_output() {
        let _g = console_guard();
        unregister_console();
        crate::kerror!("nobody hears this");
        putchar(b'x');
        assert!(console().is_none());
    }
}
