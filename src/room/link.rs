use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Delivery class of an inbound data packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    Reliable,
    Lossy,
}

/// Events surfaced by the room transport.
///
/// Events for a single participant arrive in the order the transport
/// delivered them; no ordering holds across different participants.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    ParticipantConnected {
        identity: String,
        /// Raw metadata string attached by the client at connect time.
        metadata: Option<String>,
    },
    ParticipantDisconnected {
        identity: String,
    },
    Data {
        payload: Vec<u8>,
        sender: String,
        kind: PacketKind,
    },
}

/// Unicast delivery failure.
///
/// `ParticipantNotFound` means the target could not be resolved in the room
/// right now; `Transport` is a wire-level failure. Callers treat the former
/// as a warning and the latter as an error, but neither is retried.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("participant {0} not found in room")]
    ParticipantNotFound(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Handle to an established room connection.
#[async_trait]
pub trait RoomLink: Send + Sync {
    /// Deliver `payload` reliably to exactly `target`.
    async fn send_reliable(&self, target: &str, payload: &[u8]) -> Result<(), SendError>;

    /// Tear down the connection. Safe to call more than once.
    async fn disconnect(&self) -> Result<()>;
}

/// Sink for room events, implemented by the session engine.
#[async_trait]
pub trait RoomHandler {
    async fn on_participant_connected(&self, identity: &str, metadata: Option<&str>);

    async fn on_participant_disconnected(&self, identity: &str);

    async fn on_data_received(&self, payload: &[u8], sender: &str, kind: PacketKind);
}

/// Drain room events into `handler`, one at a time, until the transport
/// closes the channel. Handlers swallow their own failures, so nothing here
/// can take the loop down.
pub async fn dispatch<H: RoomHandler>(handler: &H, mut events: mpsc::Receiver<RoomEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            RoomEvent::ParticipantConnected { identity, metadata } => {
                handler
                    .on_participant_connected(&identity, metadata.as_deref())
                    .await;
            }
            RoomEvent::ParticipantDisconnected { identity } => {
                handler.on_participant_disconnected(&identity).await;
            }
            RoomEvent::Data {
                payload,
                sender,
                kind,
            } => {
                handler.on_data_received(&payload, &sender, kind).await;
            }
        }
    }
}
