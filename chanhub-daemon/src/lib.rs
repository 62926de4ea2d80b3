//! Library crate for chanhub-daemon.
//!
//! Exposes the config and API modules so integration tests can start an
//! in-process server against a stub directory.

pub mod api;
pub mod config;
