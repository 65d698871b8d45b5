//! mockmate-core — session engine, question bank, and evaluator contract.
//!
//! This crate defines the data model, the session state machine, the
//! flat-file session store, and the evaluator adapter that the rest of
//! mockmate builds on.

pub mod bank;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod store;
pub mod summary;
pub mod traits;
