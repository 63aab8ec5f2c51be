use serde::{Deserialize, Serialize};

use super::settings::TranslationSettings;

/// Control message received on a participant's data channel.
///
/// Unknown fields are ignored; an unrecognized `action` is dropped by the
/// engine without a reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlMessage {
    pub action: String,

    #[serde(default)]
    pub settings: Option<TranslationSettings>,
}

/// Acknowledgement unicast back to the requesting participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckMessage {
    pub action: String,
    pub status: String,
}

impl AckMessage {
    pub fn translation_started() -> Self {
        Self {
            action: "translation_started".to_string(),
            status: "success".to_string(),
        }
    }

    pub fn translation_stopped() -> Self {
        Self {
            action: "translation_stopped".to_string(),
            status: "success".to_string(),
        }
    }
}
