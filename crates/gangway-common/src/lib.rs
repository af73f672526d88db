//! # gangway-common
//!
//! Shared error types and domain primitives used across the gangway
//! workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the error taxonomy and identifier types that
//! the orchestration layer builds upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod error;
pub mod types;
