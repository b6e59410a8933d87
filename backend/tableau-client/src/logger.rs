//! Optional process-wide logging for applications embedding the client.
//!
//! The library itself only talks to the `log` facade; call [`initialize`] to
//! get coloured stdout plus a plain-text `tableau-client.log`.

use crate::error::config::ConfigError;

use std::io::stdout;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

static INIT_LOGGER_ONCE: Once = Once::new();

static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "tableau-client.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Install the global logger writing to stdout and `<log_dir>/tableau-client.log`.
///
/// Safe to call more than once: later calls log a warning and return `Ok`.
///
/// # Errors
///
/// Returns [`ConfigError::Logger`] if the log file cannot be created or another
/// logger is already installed.
pub fn initialize(log_dir: &Path) -> Result<(), ConfigError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = build_dispatch(log_dir).and_then(|dispatch| {
            dispatch
                .apply()
                .map_err(|e| ConfigError::logger(format!("Failed to initialize logger: {e}")))
        });
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
        }
    });

    result
}

/// Dual dispatch (coloured stdout, plain file) without installing it.
#[track_caller]
pub(crate) fn build_dispatch(log_dir: &Path) -> Result<Dispatch, ConfigError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stdout());

    let log_file = fern::log_file(&log_file_path).map_err(|e| {
        ConfigError::logger(format!(
            "Failed to create log file {}: {e}",
            log_file_path.display()
        ))
    })?;

    // No colour codes in the file
    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(log_file);

    Ok(Dispatch::new()
        .level(LOG_LEVEL)
        .chain(stdout_dispatch)
        .chain(file_dispatch))
}
