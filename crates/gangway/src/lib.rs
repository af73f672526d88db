//! # gangway
//!
//! Ephemeral Docker containers as test fixtures.
//!
//! A [`Client`] mints [`ContainerSpec`]s; `run` creates and starts one
//! container and hands back a [`Runner`] that can probe an endpoint inside
//! it for readiness, stream its output, wait for it to exit, and tear it
//! down with every cleanup failure reported rather than swallowed.
//!
//! The engine is reached through the [`Engine`](engine::Engine) trait;
//! [`DockerEngine`](engine::docker::DockerEngine) is the bollard-backed
//! implementation, and tests inject their own.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = gangway::Client::connect()?;
//! let runner = client
//!     .container("chromedp/headless-shell:latest", "browser-fixture")
//!     .expose("9222:9222")
//!     .run(&[])
//!     .await?;
//!
//! runner
//!     .check("http://localhost:9222/json/version", Duration::from_secs(30))
//!     .await?;
//!
//! // ... drive the workload ...
//!
//! runner.kill().await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod engine;
pub mod ports;
mod probe;
pub mod runner;
pub mod spec;

pub use client::Client;
pub use engine::docker::DockerEngine;
pub use engine::{CreateConfig, Engine};
pub use gangway_common::error::{CleanupError, GangwayError, Result};
pub use gangway_common::types::{ContainerId, HostBinding};
pub use runner::Runner;
pub use spec::ContainerSpec;
