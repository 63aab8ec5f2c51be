use crate::session::SessionEngine;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Engine handle; shares session state with the dispatch loop
    pub engine: SessionEngine,
}

impl AppState {
    pub fn new(engine: SessionEngine) -> Self {
        Self { engine }
    }
}
