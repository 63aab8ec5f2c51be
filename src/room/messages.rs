use serde::{Deserialize, Serialize};

/// Presence announcement published when a participant joins or leaves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceMessage {
    pub identity: String,
    /// Raw metadata string, present on join when the client attached one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Data packet envelope carried on the room's data subjects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataMessage {
    pub sender: String,
    pub payload: String, // Base64-encoded packet bytes
    #[serde(default = "default_reliable")]
    pub reliable: bool,
}

fn default_reliable() -> bool {
    true
}
