//! Shared application state handed to every handler.

use std::sync::Arc;

use mockmate_core::engine::SessionEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SessionEngine>,
}

impl AppState {
    pub fn new(engine: SessionEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
