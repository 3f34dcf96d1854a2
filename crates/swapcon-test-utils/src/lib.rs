//! Shared test utilities for the swapcon workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: seeded config stores and registries
//! - [`pool`]: [`RecordingPool`](pool::RecordingPool), a connection pool double
//! - [`project`]: [`TestProject`](project::TestProject) for env/settings files on disk

pub mod fixtures;
pub mod pool;
pub mod project;
