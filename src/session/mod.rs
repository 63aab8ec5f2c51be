//! Translation session management
//!
//! This module provides the `SessionEngine` that owns all per-participant
//! translation state:
//! - Control message handling (start/stop requests from the data channel)
//! - Session lifecycle with idempotent start/stop semantics
//! - A per-session background phrase producer (placeholder pipeline)
//! - Reliable unicast acknowledgements back to the requesting participant

mod engine;
mod messages;
mod producer;
mod settings;
mod store;

pub use engine::{EngineTiming, SessionEngine};
pub use messages::{AckMessage, ControlMessage};
pub use settings::{TranslationSettings, VoiceGender};
pub use store::{SessionInfo, SessionStore, TranslationSession};
