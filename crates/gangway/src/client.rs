//! Entry point owning the engine handle.

use std::sync::Arc;

use gangway_common::error::Result;

use crate::engine::Engine;
use crate::engine::docker::DockerEngine;
use crate::spec::ContainerSpec;

/// Owns a handle to the container engine and mints container specs.
///
/// Created once per test run; stateless beyond the handle. The handle is
/// shared read-only across every spec and runner derived from it.
pub struct Client {
    engine: Arc<dyn Engine>,
}

impl Client {
    /// Connects to the local Docker engine.
    ///
    /// # Errors
    ///
    /// Returns an error if no local daemon endpoint can be set up.
    pub fn connect() -> Result<Self> {
        Ok(Self::with_engine(Arc::new(DockerEngine::connect()?)))
    }

    /// Builds a client over any [`Engine`] implementation. This is the
    /// seam tests use to substitute a scripted engine.
    #[must_use]
    pub fn with_engine(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Starts a new container specification for `image` under `name`.
    /// Pure; nothing touches the engine until
    /// [`run`](ContainerSpec::run).
    #[must_use]
    pub fn container(&self, image: impl Into<String>, name: impl Into<String>) -> ContainerSpec {
        ContainerSpec::new(Arc::clone(&self.engine), image, name)
    }
}
