//! merge-pilot: keep pull requests current and merge them on repository events
//!
//! Each invocation reacts to one event (push, status, pull request, check
//! suite/run, review, comment or scheduled tick), works out which pull
//! requests it affects, and applies "update" and/or "merge" to each of them.
//! Batches are processed sequentially and one failing PR never stops the
//! rest.

pub mod actions;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod platform;
pub mod reconcile;
pub mod types;
