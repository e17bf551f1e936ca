use log::{Record, Metadata, LevelFilter, SetLoggerError};

/// Cible des logs du bot. Les logs des autres crates (serenity, tokio...) sont ignorés.
pub const TARGET: &str = "nicktag";

#[macro_use]
pub mod macros {
    #[doc(alias = "log::error")]
    #[macro_export]
    macro_rules! log_error {
        ($($arg:tt)*) => {
            log::error!(target: $crate::logger::TARGET, $($arg)*)
        };
    }
    #[doc(alias = "log::warn")]
    #[macro_export]
    macro_rules! log_warn {
        ($($arg:tt)*) => {
            log::warn!(target: $crate::logger::TARGET, $($arg)*)
        };
    }
    #[doc(alias = "log::info")]
    #[macro_export]
    macro_rules! log_info {
        ($($arg:tt)*) => {
            log::info!(target: $crate::logger::TARGET, $($arg)*)
        };
    }
    #[doc(alias = "log::debug")]
    #[macro_export]
    macro_rules! log_debug {
        ($($arg:tt)*) => {
            log::debug!(target: $crate::logger::TARGET, $($arg)*)
        };
    }
}

struct SimpleLogger;

impl log::Log for SimpleLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && metadata.target() == TARGET
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{} [{}] {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.args());
        }
    }
    #[inline]
    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)
        .map(|_| log::set_max_level(level))
}
