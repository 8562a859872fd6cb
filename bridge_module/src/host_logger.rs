//! Forwards `log` records from the bridge to the host's log callback.

use api::{LogCallback, LogLevel};
use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use std::ffi::CString;

use crate::BridgeError;

struct HostLogger {
    callback: LogCallback,
}

/// Outcome of the first installation attempt: whether `log` accepted the host logger.
static INSTALLED: OnceCell<bool> = OnceCell::new();

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LevelFilter::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = to_c_string(record.target());
        let message = to_c_string(&record.args().to_string());
        (self.callback)(LogLevel::from(record.level()), target.as_ptr(), message.as_ptr());
    }

    fn flush(&self) {}
}

// Interior NULs cannot cross the boundary; they are dropped.
fn to_c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

/// Routes this library's logging to `callback`. The first callback installed
/// stays for the lifetime of the process.
pub fn install(callback: LogCallback) -> Result<(), BridgeError> {
    let mut fresh = false;
    let installed = *INSTALLED.get_or_init(|| {
        fresh = true;
        let logger: &'static HostLogger = Box::leak(Box::new(HostLogger { callback }));
        log::set_logger(logger).is_ok()
    });

    match (fresh, installed) {
        (_, false) => Err(BridgeError::LoggerTaken),
        (false, true) => Err(BridgeError::HostLoggerInstalled),
        (true, true) => {
            log::set_max_level(LevelFilter::Debug);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::c_char;

    struct NullLogger;

    impl Log for NullLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            false
        }
        fn log(&self, _: &Record) {}
        fn flush(&self) {}
    }

    static NULL_LOGGER: NullLogger = NullLogger;

    extern "C" fn ignore(_: LogLevel, _: *const c_char, _: *const c_char) {}

    #[test]
    fn foreign_logger_is_reported_on_every_install() {
        let _ = log::set_logger(&NULL_LOGGER);

        assert!(matches!(install(ignore), Err(BridgeError::LoggerTaken)));
        assert!(matches!(install(ignore), Err(BridgeError::LoggerTaken)));
    }

    #[test]
    fn strips_interior_nul() {
        assert_eq!(to_c_string("a\0b").to_str().unwrap(), "ab");
        assert_eq!(to_c_string("plain").to_str().unwrap(), "plain");
    }
}
