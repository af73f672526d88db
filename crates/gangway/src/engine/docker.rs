//! Bollard-backed implementation of the engine facade.

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, KillContainerOptions, LogOutput,
    LogsOptions, RemoveContainerOptions, StartContainerOptions, StopContainerOptions,
    WaitContainerOptions,
};
use bollard::errors::Error as DockerError;
use bollard::models::{HostConfig, PortBinding};
use futures::StreamExt;
use gangway_common::error::{GangwayError, Result};
use gangway_common::types::ContainerId;
use tokio::io::AsyncWriteExt;

use super::{CreateConfig, Engine, LogSink};

/// [`Engine`] implementation over the Docker API via bollard.
#[derive(Debug, Clone)]
pub struct DockerEngine {
    docker: Docker,
}

impl DockerEngine {
    /// Connects using the platform's local defaults (the Unix socket on
    /// Linux and macOS, the named pipe on Windows).
    ///
    /// # Errors
    ///
    /// Returns an error if no local daemon endpoint can be set up.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().map_err(GangwayError::engine)?;
        Ok(Self { docker })
    }

    /// Wraps an already-configured bollard client.
    #[must_use]
    pub const fn new(docker: Docker) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl Engine for DockerEngine {
    async fn inspect_image(&self, image: &str) -> Result<()> {
        match self.docker.inspect_image(image).await {
            Ok(_) => Ok(()),
            Err(DockerError::DockerResponseServerError {
                status_code: 404, ..
            }) => Err(GangwayError::ImageNotFound {
                image: image.to_string(),
            }),
            Err(e) => Err(GangwayError::engine(e)),
        }
    }

    async fn create_container(&self, name: &str, config: CreateConfig) -> Result<ContainerId> {
        let exposed: HashMap<String, HashMap<(), ()>> = config
            .exposed_ports
            .iter()
            .map(|port| (port.clone(), HashMap::new()))
            .collect();

        let mut bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
        for (container_port, host) in &config.port_bindings {
            let binding = PortBinding {
                host_ip: Some(host.host_ip.clone()),
                host_port: Some(host.host_port.clone()),
            };
            bindings
                .entry(container_port.clone())
                .or_insert_with(|| Some(Vec::new()))
                .get_or_insert_with(Vec::new)
                .push(binding);
        }

        let options = CreateContainerOptions {
            name: name.to_string(),
            platform: None,
        };
        let body = Config {
            image: Some(config.image),
            cmd: if config.command.is_empty() {
                None
            } else {
                Some(config.command)
            },
            exposed_ports: if exposed.is_empty() {
                None
            } else {
                Some(exposed)
            },
            host_config: Some(HostConfig {
                port_bindings: if bindings.is_empty() {
                    None
                } else {
                    Some(bindings)
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        let response = self
            .docker
            .create_container(Some(options), body)
            .await
            .map_err(GangwayError::engine)?;
        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<()> {
        self.docker
            .start_container(id.as_str(), None::<StartContainerOptions<String>>)
            .await
            .map_err(GangwayError::engine)
    }

    async fn inspect_container(&self, id: &ContainerId) -> Result<ContainerId> {
        let descriptor = self
            .docker
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(GangwayError::engine)?;
        Ok(descriptor.id.map_or_else(|| id.clone(), ContainerId::new))
    }

    async fn stream_logs(
        &self,
        id: &ContainerId,
        mut stdout: Option<LogSink<'_>>,
        mut stderr: Option<LogSink<'_>>,
    ) -> Result<()> {
        let options = LogsOptions::<String> {
            follow: true,
            stdout: stdout.is_some(),
            stderr: stderr.is_some(),
            ..Default::default()
        };

        let mut stream = self.docker.logs(id.as_str(), Some(options));
        while let Some(item) = stream.next().await {
            match item.map_err(GangwayError::engine)? {
                LogOutput::StdOut { message } | LogOutput::Console { message } => {
                    if let Some(sink) = stdout.as_mut() {
                        sink.write_all(&message).await.map_err(GangwayError::engine)?;
                    }
                }
                LogOutput::StdErr { message } => {
                    if let Some(sink) = stderr.as_mut() {
                        sink.write_all(&message).await.map_err(GangwayError::engine)?;
                    }
                }
                LogOutput::StdIn { .. } => {}
            }
        }
        Ok(())
    }

    async fn wait_container(&self, id: &ContainerId) -> Result<i64> {
        let mut stream = self
            .docker
            .wait_container(id.as_str(), None::<WaitContainerOptions<String>>);
        match stream.next().await {
            Some(Ok(response)) => Ok(response.status_code),
            // Depending on the wait condition, bollard reports a non-zero
            // exit as an error item instead of a response.
            Some(Err(DockerError::DockerContainerWaitError { code, .. })) => Ok(code),
            Some(Err(e)) => Err(GangwayError::engine(e)),
            None => Err(GangwayError::engine(std::io::Error::other(
                "wait stream ended without an exit status",
            ))),
        }
    }

    async fn stop_container(&self, id: &ContainerId, deadline_secs: i64) -> Result<()> {
        self.docker
            .stop_container(id.as_str(), Some(StopContainerOptions { t: deadline_secs }))
            .await
            .map_err(GangwayError::engine)
    }

    async fn kill_container(&self, id: &ContainerId) -> Result<()> {
        self.docker
            .kill_container(id.as_str(), None::<KillContainerOptions<String>>)
            .await
            .map_err(GangwayError::engine)
    }

    async fn remove_container(&self, id: &ContainerId) -> Result<()> {
        self.docker
            .remove_container(
                id.as_str(),
                Some(RemoveContainerOptions {
                    v: true,
                    force: true,
                    ..Default::default()
                }),
            )
            .await
            .map_err(GangwayError::engine)
    }
}
