// Some feature combinations result in some of these macros never being used.
// Which is fine. Just squash the warnings.
#![allow(unused_macros)]

macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::debug!($($tt)*);
        }
    }
}

macro_rules! trace {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            log::trace!($($tt)*);
        }
    }
}

/// A simple logger that writes every message to stderr.
///
/// This is only used in tests, and only when the `logging` feature is
/// enabled. Call `Logger::init` at the start of a test to see why a parse
/// failed or which unit the printer picked.
#[cfg(all(test, feature = "logging"))]
#[derive(Debug)]
pub(crate) struct Logger(());

#[cfg(all(test, feature = "logging"))]
const LOGGER: &'static Logger = &Logger(());

#[cfg(all(test, feature = "logging"))]
impl Logger {
    /// Install this logger as the global logger.
    ///
    /// Installing a logger more than once is harmless. Since tests run
    /// concurrently, the error from the second attempt is ignored.
    pub(crate) fn init() {
        if log::set_logger(LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    }
}

#[cfg(all(test, feature = "logging"))]
impl log::Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => alloc::format!("{file}:{line}"),
            (Some(file), None) => alloc::format!("{file}"),
            (None, _) => alloc::format!("?"),
        };
        std::eprintln!(
            "{}|{}|{}: {}",
            record.level(),
            record.target(),
            location,
            record.args(),
        );
    }

    fn flush(&self) {}
}
