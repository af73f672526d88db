//! Lifecycle orchestration for one running container.

use std::sync::Arc;
use std::time::Duration;

use gangway_common::error::{CleanupError, GangwayError, Result};
use gangway_common::types::ContainerId;
use tokio::io::AsyncWrite;

use crate::engine::{Engine, LogSink};
use crate::probe;

/// Handle to one created-and-started container.
///
/// A `Runner` exists only as the result of a successful
/// [`ContainerSpec::run`](crate::ContainerSpec::run) and is the sole owner
/// of its container identifier. The identifier is set once and never
/// mutated, so read-only operations (`check`, `logs`) may run concurrently
/// with teardown from separate tasks without locking.
///
/// There is no automatic termination: the test harness is responsible for
/// always reaching [`stop`](Self::stop) or [`kill`](Self::kill).
pub struct Runner {
    engine: Arc<dyn Engine>,
    id: ContainerId,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner").field("id", &self.id).finish_non_exhaustive()
    }
}

impl Runner {
    pub(crate) const fn new(engine: Arc<dyn Engine>, id: ContainerId) -> Self {
        Self { engine, id }
    }

    /// The engine-assigned container identifier.
    #[must_use]
    pub const fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Probes `address` until it answers, for at most `within`.
    ///
    /// Purely observational; engine state is untouched. HTTP(S) addresses
    /// are ready on any response at all; any other scheme is ready once a
    /// TCP connection to the address's host and port is established.
    ///
    /// # Errors
    ///
    /// Returns [`GangwayError::InvalidAddress`] for an unusable address or
    /// [`GangwayError::ReadinessTimeout`] once the budget is exhausted.
    pub async fn check(&self, address: &str, within: Duration) -> Result<()> {
        probe::wait_ready(address, within).await
    }

    /// Streams both output sides in follow mode into the given sinks until
    /// the engine stream ends or this future is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream or a sink write fails.
    pub async fn logs<O, E>(&self, stdout: &mut O, stderr: &mut E) -> Result<()>
    where
        O: AsyncWrite + Send + Unpin,
        E: AsyncWrite + Send + Unpin,
    {
        let stdout: LogSink<'_> = stdout;
        let stderr: LogSink<'_> = stderr;
        self.engine
            .stream_logs(&self.id, Some(stdout), Some(stderr))
            .await
    }

    /// Streams only standard output into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream or a sink write fails.
    pub async fn stdout<W>(&self, sink: &mut W) -> Result<()>
    where
        W: AsyncWrite + Send + Unpin,
    {
        let sink: LogSink<'_> = sink;
        self.engine.stream_logs(&self.id, Some(sink), None).await
    }

    /// Streams only standard error into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream or a sink write fails.
    pub async fn stderr<W>(&self, sink: &mut W) -> Result<()>
    where
        W: AsyncWrite + Send + Unpin,
    {
        let sink: LogSink<'_> = sink;
        self.engine.stream_logs(&self.id, None, Some(sink)).await
    }

    /// Blocks until the container exits.
    ///
    /// # Errors
    ///
    /// Returns [`GangwayError::NonZeroExit`] for a non-zero exit code,
    /// distinct from engine transport failures.
    pub async fn wait(&self) -> Result<()> {
        let code = self.engine.wait_container(&self.id).await?;
        if code == 0 {
            Ok(())
        } else {
            Err(GangwayError::NonZeroExit { code })
        }
    }

    /// Gracefully stops the container (killing after `kill_deadline_secs`),
    /// then removes it with forced volume cleanup.
    ///
    /// Both steps always run; a failed stop never prevents the removal
    /// attempt, and a failed removal never hides a failed stop.
    ///
    /// # Errors
    ///
    /// Returns every failing step's error, in order.
    pub async fn stop(&self, kill_deadline_secs: i64) -> std::result::Result<(), CleanupError> {
        let stopped = self
            .engine
            .stop_container(&self.id, kill_deadline_secs)
            .await;
        self.finish_teardown("stop", stopped).await
    }

    /// Immediately terminates the container, then removes it with forced
    /// volume cleanup. Same aggregation policy as [`stop`](Self::stop).
    ///
    /// # Errors
    ///
    /// Returns every failing step's error, in order.
    pub async fn kill(&self) -> std::result::Result<(), CleanupError> {
        let killed = self.engine.kill_container(&self.id).await;
        self.finish_teardown("kill", killed).await
    }

    /// Removal always runs, even after a failed primary action; these are
    /// cleanup paths invoked during failure unwinding, and a swallowed
    /// second failure would hide a leaked container.
    async fn finish_teardown(
        &self,
        action: &str,
        primary: Result<()>,
    ) -> std::result::Result<(), CleanupError> {
        let mut failures = Vec::new();
        if let Err(e) = primary {
            tracing::warn!(id = %self.id, action, error = %e, "teardown action failed");
            failures.push(e);
        }
        if let Err(e) = self.engine.remove_container(&self.id).await {
            tracing::warn!(id = %self.id, error = %e, "container removal failed");
            failures.push(e);
        }
        if failures.is_empty() {
            tracing::info!(id = %self.id, action, "container torn down");
            Ok(())
        } else {
            Err(CleanupError::new(failures))
        }
    }
}
