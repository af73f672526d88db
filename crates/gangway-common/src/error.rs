//! Error types for the gangway workspace.
//!
//! [`GangwayError`] covers the single-failure paths; teardown, which runs
//! every cleanup step regardless of earlier failures, reports through the
//! multi-failure [`CleanupError`].

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Top-level error type for fixture operations.
#[derive(Debug, Error)]
pub enum GangwayError {
    /// The container specification is invalid.
    #[error("invalid container spec: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The requested image does not exist in the engine.
    #[error("image not found: {image}")]
    ImageNotFound {
        /// Image reference that failed inspection.
        image: String,
    },

    /// A probe address could not be parsed into a scheme and endpoint.
    #[error("invalid probe address: {address}")]
    InvalidAddress {
        /// The address as supplied by the caller.
        address: String,
    },

    /// The readiness prober exhausted its wait budget.
    #[error("endpoint {address} not ready after {waited:?}")]
    ReadinessTimeout {
        /// Endpoint that never became reachable.
        address: String,
        /// Total time the prober was allowed to wait.
        waited: Duration,
    },

    /// The container process exited with a non-zero code.
    #[error("container exited with error code: {code}")]
    NonZeroExit {
        /// Exit code reported by the engine.
        code: i64,
    },

    /// The container engine rejected or failed an operation.
    #[error("engine operation failed: {source}")]
    Engine {
        /// Underlying engine client error, preserved unchanged.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl GangwayError {
    /// Wraps an engine client error without altering it.
    pub fn engine(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Engine {
            source: Box::new(source),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, GangwayError>;

/// Aggregated failures from a multi-step teardown.
///
/// `stop` and `kill` always attempt both their primary action and container
/// removal; every failing step lands here in order. Callers inspect
/// [`failures`](Self::failures) rather than a merged message.
#[derive(Debug, Error)]
pub struct CleanupError {
    failures: Vec<GangwayError>,
}

impl CleanupError {
    /// Builds an aggregate from the collected step failures.
    ///
    /// Intended for use with a non-empty list; an empty aggregate displays
    /// as zero failed steps but is never produced by the runner.
    #[must_use]
    pub fn new(failures: Vec<GangwayError>) -> Self {
        Self { failures }
    }

    /// The individual step failures, in the order the steps ran.
    #[must_use]
    pub fn failures(&self) -> &[GangwayError] {
        &self.failures
    }

    /// Consumes the aggregate, yielding the ordered failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<GangwayError> {
        self.failures
    }
}

impl fmt::Display for CleanupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cleanup failed ({} step(s)): ", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_names_the_code() {
        let err = GangwayError::NonZeroExit { code: 7 };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn engine_error_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "no daemon");
        let err = GangwayError::engine(io);
        let source = std::error::Error::source(&err);
        assert!(source.is_some(), "wrapped source must be reachable");
    }

    #[test]
    fn cleanup_error_keeps_failure_order() {
        let err = CleanupError::new(vec![
            GangwayError::Config {
                message: "first".into(),
            },
            GangwayError::Config {
                message: "second".into(),
            },
        ]);
        assert_eq!(err.failures().len(), 2);
        assert!(matches!(
            &err.failures()[0],
            GangwayError::Config { message } if message == "first"
        ));
    }

    #[test]
    fn cleanup_error_display_includes_every_step() {
        let err = CleanupError::new(vec![
            GangwayError::Config {
                message: "stop refused".into(),
            },
            GangwayError::Config {
                message: "remove refused".into(),
            },
        ]);
        let rendered = err.to_string();
        assert!(rendered.contains("2 step(s)"));
        assert!(rendered.contains("stop refused"));
        assert!(rendered.contains("remove refused"));
    }
}
