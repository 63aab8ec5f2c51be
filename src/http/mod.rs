//! HTTP status API
//!
//! Read-only observability surface for the translator:
//! - GET /sessions - List active translation sessions
//! - GET /sessions/:identity - Query one participant's session
//! - GET /health - Health check
//!
//! Session mutation stays on the room data channel; this API never starts
//! or stops translations.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
