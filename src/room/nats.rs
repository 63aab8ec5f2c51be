use anyhow::{Context, Result};
use async_nats::Client;
use base64::Engine;
use futures::stream::StreamExt;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{info, warn};

use super::link::{PacketKind, RoomEvent, RoomLink, SendError};
use super::messages::{DataMessage, PresenceMessage};
use async_trait::async_trait;

/// NATS-backed room transport.
///
/// Subjects under `room.<name>`:
/// - `presence.connected` / `presence.disconnected` — roster announcements
/// - `data.ingress` — packets addressed to the bot
/// - `participant.<identity>` — per-participant unicast inbox
pub struct NatsRoomLink {
    client: Client,
    room_name: String,
    bot_identity: String,
    /// Identities currently announced in the room. Unicast targets are
    /// resolved against this before publishing.
    roster: Arc<RwLock<HashSet<String>>>,
    connected: AtomicBool,
}

impl NatsRoomLink {
    /// Connect to the room and announce the bot on the presence subject.
    ///
    /// Returns the link together with the receiver the engine drains room
    /// events from. The event stream ends when the receiver is dropped or
    /// the server closes the subscriptions.
    pub async fn connect(
        url: &str,
        room_name: &str,
        bot_identity: &str,
    ) -> Result<(Self, mpsc::Receiver<RoomEvent>)> {
        info!("Connecting to room {} at {}", room_name, url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        let mut connected_sub = client
            .subscribe(format!("room.{room_name}.presence.connected"))
            .await
            .context("Failed to subscribe to presence")?;
        let mut disconnected_sub = client
            .subscribe(format!("room.{room_name}.presence.disconnected"))
            .await
            .context("Failed to subscribe to presence")?;
        let mut data_sub = client
            .subscribe(format!("room.{room_name}.data.ingress"))
            .await
            .context("Failed to subscribe to data ingress")?;

        info!("Connected to room {}", room_name);

        let roster = Arc::new(RwLock::new(HashSet::new()));
        let (events_tx, events_rx) = mpsc::channel(64);

        // Pump task: translates wire envelopes into RoomEvents and keeps the
        // roster current. Our own presence announcement loops back on the
        // subscription, so events for the bot identity are skipped.
        let pump_roster = Arc::clone(&roster);
        let own_identity = bot_identity.to_string();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    msg = connected_sub.next() => {
                        let Some(msg) = msg else { break };
                        let presence: PresenceMessage = match serde_json::from_slice(&msg.payload) {
                            Ok(p) => p,
                            Err(e) => {
                                warn!("Dropping malformed presence message: {}", e);
                                continue;
                            }
                        };
                        if presence.identity == own_identity {
                            continue;
                        }
                        pump_roster.write().await.insert(presence.identity.clone());
                        let event = RoomEvent::ParticipantConnected {
                            identity: presence.identity,
                            metadata: presence.metadata,
                        };
                        if events_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    msg = disconnected_sub.next() => {
                        let Some(msg) = msg else { break };
                        let presence: PresenceMessage = match serde_json::from_slice(&msg.payload) {
                            Ok(p) => p,
                            Err(e) => {
                                warn!("Dropping malformed presence message: {}", e);
                                continue;
                            }
                        };
                        if presence.identity == own_identity {
                            continue;
                        }
                        pump_roster.write().await.remove(&presence.identity);
                        let event = RoomEvent::ParticipantDisconnected {
                            identity: presence.identity,
                        };
                        if events_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    msg = data_sub.next() => {
                        let Some(msg) = msg else { break };
                        let data: DataMessage = match serde_json::from_slice(&msg.payload) {
                            Ok(d) => d,
                            Err(e) => {
                                warn!("Dropping malformed data envelope: {}", e);
                                continue;
                            }
                        };
                        let payload = match base64::engine::general_purpose::STANDARD
                            .decode(&data.payload)
                        {
                            Ok(bytes) => bytes,
                            Err(e) => {
                                warn!("Dropping data packet from {}: bad payload encoding: {}", data.sender, e);
                                continue;
                            }
                        };
                        let kind = if data.reliable {
                            PacketKind::Reliable
                        } else {
                            PacketKind::Lossy
                        };
                        let event = RoomEvent::Data {
                            payload,
                            sender: data.sender,
                            kind,
                        };
                        if events_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                }
            }
            info!("Room event stream closed");
        });

        let link = Self {
            client,
            room_name: room_name.to_string(),
            bot_identity: bot_identity.to_string(),
            roster,
            connected: AtomicBool::new(true),
        };
        link.announce().await?;

        Ok((link, events_rx))
    }

    /// Publish the bot's own presence so other participants see it.
    async fn announce(&self) -> Result<()> {
        let announcement = PresenceMessage {
            identity: self.bot_identity.clone(),
            metadata: None,
        };
        let payload = serde_json::to_vec(&announcement)?;
        self.client
            .publish(
                format!("room.{}.presence.connected", self.room_name),
                payload.into(),
            )
            .await
            .context("Failed to announce presence")?;
        Ok(())
    }
}

#[async_trait]
impl RoomLink for NatsRoomLink {
    async fn send_reliable(&self, target: &str, payload: &[u8]) -> Result<(), SendError> {
        {
            let roster = self.roster.read().await;
            if !roster.contains(target) {
                return Err(SendError::ParticipantNotFound(target.to_string()));
            }
        }

        let envelope = DataMessage {
            sender: self.bot_identity.clone(),
            payload: base64::engine::general_purpose::STANDARD.encode(payload),
            reliable: true,
        };
        let bytes = serde_json::to_vec(&envelope)
            .context("Failed to encode data envelope")
            .map_err(SendError::Transport)?;

        self.client
            .publish(
                format!("room.{}.participant.{}", self.room_name, target),
                bytes.into(),
            )
            .await
            .context("Failed to publish unicast")
            .map_err(SendError::Transport)?;

        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        info!("Disconnecting from room {}", self.room_name);

        let farewell = PresenceMessage {
            identity: self.bot_identity.clone(),
            metadata: None,
        };
        let payload = serde_json::to_vec(&farewell)?;
        self.client
            .publish(
                format!("room.{}.presence.disconnected", self.room_name),
                payload.into(),
            )
            .await
            .context("Failed to publish farewell")?;
        self.client
            .flush()
            .await
            .context("Failed to flush NATS connection")?;

        Ok(())
    }
}
