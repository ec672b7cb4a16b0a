//! I/O error classification and the save retry policy of the file store.

use std::io::ErrorKind;
use std::time::Duration;

use crate::config::MappingConfig;
use crate::error::MappingError;

/// Maps an I/O error onto a store error, prefixing `context`.
///
/// Interrupted, timed-out and would-block errors become `TransientIoError`,
/// the only variant [`SaveRetry`] retries. A full disk is `DiskFull`.
pub fn classify_io_error(error: std::io::Error, context: &str) -> MappingError {
    let message = format!("{}: {}", context, error);
    match error.kind() {
        ErrorKind::StorageFull | ErrorKind::OutOfMemory => MappingError::DiskFull(message),
        ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted => {
            MappingError::TransientIoError(message)
        }
        _ => MappingError::IoError(message),
    }
}

/// How often a failed store write is attempted again.
///
/// A retry repeats the whole write (temp file, fsync, rename) after a fixed
/// delay. Only `TransientIoError` is retried; the last error is returned once
/// the attempts are used up. Callers above the store never retry.
#[derive(Debug, Clone, Copy)]
pub struct SaveRetry {
    max_retries: u32,
    delay: Duration,
}

impl SaveRetry {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn from_config(config: &MappingConfig) -> Self {
        Self::new(
            config.persistence_max_retries,
            Duration::from_millis(config.persistence_retry_delay_ms),
        )
    }

    /// Runs `write`, retrying transient failures.
    pub fn run<T, F>(&self, context: &str, write: F) -> Result<T, MappingError>
    where
        F: Fn() -> Result<T, MappingError>,
    {
        let mut attempt = 0;
        loop {
            match write() {
                Err(MappingError::TransientIoError(msg)) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Store write for {} failed transiently (retry {}/{}): {}",
                        context,
                        attempt,
                        self.max_retries,
                        msg
                    );
                    if !self.delay.is_zero() {
                        std::thread::sleep(self.delay);
                    }
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn no_delay(max_retries: u32) -> SaveRetry {
        SaveRetry::new(max_retries, Duration::ZERO)
    }

    #[test]
    fn test_classify() {
        let err = classify_io_error(std::io::Error::from(ErrorKind::TimedOut), "write");
        assert!(matches!(err, MappingError::TransientIoError(_)));

        let err = classify_io_error(std::io::Error::from(ErrorKind::PermissionDenied), "write");
        assert!(matches!(err, MappingError::IoError(ref m) if m.starts_with("write: ")));
        assert!(err.is_save_failure());
    }

    #[test]
    fn test_from_config() {
        let config = MappingConfig {
            persistence_max_retries: 5,
            persistence_retry_delay_ms: 20,
            ..Default::default()
        };
        let retry = SaveRetry::from_config(&config);
        assert_eq!(retry.max_retries, 5);
        assert_eq!(retry.delay, Duration::from_millis(20));
    }

    #[test]
    fn test_retries_transient_errors() {
        let calls = Cell::new(0);
        let result = no_delay(3).run("form 1", || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(MappingError::TransientIoError("busy".to_string()))
            } else {
                Ok(calls.get())
            }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_gives_up_after_max_retries() {
        let calls = Cell::new(0);
        let result: Result<(), _> = no_delay(2).run("form 1", || {
            calls.set(calls.get() + 1);
            Err(MappingError::TransientIoError("busy".to_string()))
        });
        assert!(matches!(result, Err(MappingError::TransientIoError(_))));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_does_not_retry_permanent_errors() {
        let calls = Cell::new(0);
        let result: Result<(), _> = no_delay(5).run("form 1", || {
            calls.set(calls.get() + 1);
            Err(MappingError::DiskFull("no space".to_string()))
        });
        assert!(matches!(result, Err(MappingError::DiskFull(_))));
        assert_eq!(calls.get(), 1);
    }
}
