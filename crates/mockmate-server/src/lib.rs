//! mockmate-server — HTTP API and CLI commands.
//!
//! Split into a library so the router can be driven in-process by the
//! integration tests.

pub mod commands;
pub mod error;
pub mod routes;
pub mod state;
