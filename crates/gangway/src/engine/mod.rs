//! Container engine facade.
//!
//! The orchestration layer reaches the engine only through the [`Engine`]
//! trait: the minimal capability set one fixture needs. The bollard-backed
//! implementation lives in [`docker`]; tests substitute their own.

pub mod docker;

use async_trait::async_trait;
use gangway_common::error::Result;
use gangway_common::types::{ContainerId, HostBinding};
use tokio::io::AsyncWrite;

/// Byte sink for one side of a log stream.
pub type LogSink<'a> = &'a mut (dyn AsyncWrite + Send + Unpin);

/// Everything the engine needs to create one container.
#[derive(Debug, Clone, Default)]
pub struct CreateConfig {
    /// Image reference the container runs.
    pub image: String,
    /// Command to execute; empty means the image default.
    pub command: Vec<String>,
    /// Container-side ports to expose, in declaration order.
    pub exposed_ports: Vec<String>,
    /// Host bindings, keyed by container-side port.
    pub port_bindings: Vec<(String, HostBinding)>,
}

/// Narrow boundary to the external container engine.
///
/// Every state-changing operation the orchestrator performs goes through
/// here. Implementations must be safe to share across concurrently running
/// fixtures; each [`Runner`](crate::Runner) addresses a distinct container
/// identifier, so no cross-call locking is required of them.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Verifies that an image exists in the engine.
    ///
    /// # Errors
    ///
    /// Returns [`GangwayError::ImageNotFound`](gangway_common::error::GangwayError::ImageNotFound)
    /// if the image is unknown, or an engine error for any other failure.
    async fn inspect_image(&self, image: &str) -> Result<()>;

    /// Creates a container, returning the engine-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the creation.
    async fn create_container(&self, name: &str, config: CreateConfig) -> Result<ContainerId>;

    /// Starts a previously created container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be started.
    async fn start_container(&self, id: &ContainerId) -> Result<()>;

    /// Re-fetches a container's descriptor, returning its canonical
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be inspected.
    async fn inspect_container(&self, id: &ContainerId) -> Result<ContainerId>;

    /// Streams container output in follow mode into the given sinks until
    /// the engine stream ends. A `None` sink drops that side entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream fails or a sink write fails.
    async fn stream_logs(
        &self,
        id: &ContainerId,
        stdout: Option<LogSink<'_>>,
        stderr: Option<LogSink<'_>>,
    ) -> Result<()>;

    /// Blocks until the container exits, returning its exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot report the exit.
    async fn wait_container(&self, id: &ContainerId) -> Result<i64>;

    /// Requests a graceful stop, killing after `deadline_secs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stop request fails.
    async fn stop_container(&self, id: &ContainerId, deadline_secs: i64) -> Result<()>;

    /// Requests immediate termination.
    ///
    /// # Errors
    ///
    /// Returns an error if the kill request fails.
    async fn kill_container(&self, id: &ContainerId) -> Result<()>;

    /// Removes the container, always with forced volume cleanup.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails.
    async fn remove_container(&self, id: &ContainerId) -> Result<()>;
}
