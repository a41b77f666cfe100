//! Redaction of employee values in log output.
//!
//! Names and amounts may only reach the logs when data logging has been
//! switched on (the CLI's `--log-data`). Everything else logs
//! [`REDACTED_VALUE`] in their place.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder logged instead of employee values.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Allows or forbids employee values in logs for the whole process.
pub fn set_log_data_enabled(enabled: bool) {
    LOG_DATA_ENABLED.store(enabled, Ordering::Release);
}

/// Returns true if employee values may be logged.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Acquire)
}

/// Returns the value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Log field wrapper; formats the inner value only when data logging is on.
///
/// ```ignore
/// trace!(amount = %Redacted(&amount), "resolved");
/// ```
pub struct Redacted<T>(pub T);

impl<T: fmt::Display> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if log_data_enabled() {
            self.0.fmt(f)
        } else {
            f.write_str(REDACTED_VALUE)
        }
    }
}
