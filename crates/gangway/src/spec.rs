//! Fluent container specification, finalized by `run`.

use std::sync::Arc;

use gangway_common::error::{GangwayError, Result};

use crate::engine::{CreateConfig, Engine};
use crate::ports;
use crate::runner::Runner;

/// Declarative description of one container: image, name, and port
/// exposures. Built by chained calls, side-effect free until
/// [`run`](Self::run).
pub struct ContainerSpec {
    engine: Arc<dyn Engine>,
    image: String,
    name: String,
    exposures: Vec<String>,
}

impl ContainerSpec {
    pub(crate) fn new(
        engine: Arc<dyn Engine>,
        image: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            image: image.into(),
            name: name.into(),
            exposures: Vec::new(),
        }
    }

    /// Declares a port exposure, either `"<port>"` or
    /// `"<hostPort>:<containerPort>"`. Not validated here; parsing happens
    /// in [`run`](Self::run) and is permissive (see [`crate::ports`]).
    #[must_use]
    pub fn expose(mut self, mapping: impl Into<String>) -> Self {
        self.exposures.push(mapping.into());
        self
    }

    /// Creates and starts the container, returning its [`Runner`].
    ///
    /// Steps run in order, each a precondition for the next: verify the
    /// image exists, parse exposures, create, start, then re-inspect for
    /// the engine-assigned identifier. Any failure aborts the whole
    /// operation with the underlying error; no partially started fixture
    /// is ever returned.
    ///
    /// An empty `command` runs the image's default.
    ///
    /// # Errors
    ///
    /// Returns [`GangwayError::Config`] for an empty image or name,
    /// [`GangwayError::ImageNotFound`] if image inspection misses, or the
    /// engine's error from the failing step.
    pub async fn run(self, command: &[&str]) -> Result<Runner> {
        if self.image.is_empty() {
            return Err(GangwayError::Config {
                message: "image must not be empty".to_string(),
            });
        }
        if self.name.is_empty() {
            return Err(GangwayError::Config {
                message: "container name must not be empty".to_string(),
            });
        }

        self.engine.inspect_image(&self.image).await?;

        let port_map = ports::parse_exposures(&self.exposures);
        let config = CreateConfig {
            image: self.image.clone(),
            command: command.iter().map(ToString::to_string).collect(),
            exposed_ports: port_map.exposed,
            port_bindings: port_map.bindings,
        };

        let id = self.engine.create_container(&self.name, config).await?;
        tracing::info!(id = %id, name = %self.name, image = %self.image, "container created");

        self.engine.start_container(&id).await?;
        tracing::info!(id = %id, "container started");

        let id = self.engine.inspect_container(&id).await?;
        Ok(Runner::new(self.engine, id))
    }
}
