//! JSON-RPC API module for the chanhub-daemon.
//!
//! This module exposes the aggregation facade to clients (web proxy, CLI,
//! etc.) over a JSON-RPC interface via HTTP.

pub mod handlers;
pub mod server;

pub use server::start_server;
