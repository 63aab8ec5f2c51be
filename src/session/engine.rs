use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, error, info, warn};

use crate::room::{dispatch, PacketKind, RoomEvent, RoomHandler, RoomLink, SendError};

use super::messages::{AckMessage, ControlMessage};
use super::producer::spawn_phrase_producer;
use super::settings::TranslationSettings;
use super::store::{SessionInfo, SessionStore, TranslationSession};

/// Timing knobs for session activation and the phrase producer.
#[derive(Debug, Clone, Copy)]
pub struct EngineTiming {
    /// Simulated model-loading delay before a session becomes active
    pub load_delay: Duration,

    /// Interval between synthetic transcript lines
    pub tick_interval: Duration,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self {
            load_delay: Duration::from_secs(2),
            tick_interval: Duration::from_secs(5),
        }
    }
}

/// Authoritative owner of translation session state.
///
/// The engine is the room's single event sink: the dispatch loop feeds it
/// one event at a time, and every state transition (session start/stop,
/// metadata bookkeeping, producer supervision, acknowledgements) happens
/// here. Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct SessionEngine {
    link: Arc<dyn RoomLink>,
    sessions: SessionStore,
    metadata: Arc<RwLock<HashMap<String, Value>>>,
    timing: EngineTiming,
}

impl SessionEngine {
    pub fn new(link: Arc<dyn RoomLink>) -> Self {
        Self::with_timing(link, EngineTiming::default())
    }

    pub fn with_timing(link: Arc<dyn RoomLink>, timing: EngineTiming) -> Self {
        Self {
            link,
            sessions: SessionStore::new(),
            metadata: Arc::new(RwLock::new(HashMap::new())),
            timing,
        }
    }

    /// Drain room events until the transport closes the channel.
    pub async fn run(&self, events: mpsc::Receiver<RoomEvent>) {
        dispatch(self, events).await;
    }

    /// Start a translation session for `identity`.
    ///
    /// A duplicate request is a no-op: no second producer, no second
    /// acknowledgement. Otherwise activation (model loading, store insert,
    /// producer spawn, ack) proceeds in the background so event dispatch is
    /// not held up by the loading delay.
    pub async fn start_translation(&self, identity: &str, settings: TranslationSettings) {
        if self.sessions.contains(identity).await {
            info!("Translation already active for {}", identity);
            return;
        }

        info!(
            "Starting translation for {}: {} -> {}, voice {:?}",
            identity, settings.input_lang, settings.output_lang, settings.gender
        );

        let engine = self.clone();
        let identity = identity.to_string();
        tokio::spawn(async move {
            engine.activate(identity, settings).await;
        });
    }

    /// Delayed half of `start_translation`.
    ///
    /// The session only appears in the store once the loading delay has
    /// elapsed. A stop or disconnect that arrives in the meantime finds
    /// nothing to stop, and the session is still created afterward.
    async fn activate(&self, identity: String, settings: TranslationSettings) {
        info!(
            "Loading translation models for {} -> {}",
            settings.input_lang, settings.output_lang
        );
        tokio::time::sleep(self.timing.load_delay).await;

        let tick_interval = self.timing.tick_interval;
        let inserted = self
            .sessions
            .insert_if_absent(&identity, || {
                let active = Arc::new(AtomicBool::new(true));
                let producer = spawn_phrase_producer(
                    identity.clone(),
                    settings.clone(),
                    Arc::clone(&active),
                    tick_interval,
                );
                TranslationSession::new(settings.clone(), active, producer)
            })
            .await;

        if !inserted {
            // Another start for the same identity won the race during the
            // loading delay; it already owns the producer and the ack.
            info!("Translation already active for {}", identity);
            return;
        }

        self.send_to_participant(&identity, &AckMessage::translation_started())
            .await;
    }

    /// Stop the translation session for `identity`, if one exists.
    ///
    /// Removal from the store and clearing the session's flag happen
    /// together; the producer observes the cleared flag at its next tick
    /// boundary, so it may survive the store entry by up to one interval.
    pub async fn stop_translation(&self, identity: &str) {
        let Some(session) = self.sessions.remove(identity).await else {
            info!("No active translation for {}", identity);
            return;
        };

        info!("Stopping translation for {}", identity);
        session.deactivate();

        self.send_to_participant(identity, &AckMessage::translation_stopped())
            .await;
    }

    /// Serialize `message` and unicast it reliably to `identity`.
    ///
    /// Fire-and-forget: an unresolvable target or a transport failure is
    /// logged and the message dropped. No retry, no queueing.
    pub async fn send_to_participant(&self, identity: &str, message: &AckMessage) {
        let payload = match serde_json::to_vec(message) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to encode {} for {}: {}", message.action, identity, e);
                return;
            }
        };

        match self.link.send_reliable(identity, &payload).await {
            Ok(()) => info!("Sent {} to {}", message.action, identity),
            Err(SendError::ParticipantNotFound(_)) => {
                warn!("Participant {} not found, dropping {}", identity, message.action);
            }
            Err(e) => error!("Failed to send {} to {}: {}", message.action, identity, e),
        }
    }

    /// Stop every remaining session and wait for the producers to wind
    /// down. Bounded by one tick interval overall.
    pub async fn shutdown(&self) {
        let sessions = self.sessions.drain().await;
        if sessions.is_empty() {
            return;
        }

        info!("Stopping {} active translation(s)", sessions.len());

        let mut producers = Vec::with_capacity(sessions.len());
        for (identity, session) in sessions {
            session.deactivate();
            self.send_to_participant(&identity, &AckMessage::translation_stopped())
                .await;
            producers.push((identity, session.into_producer()));
        }

        for (identity, producer) in producers {
            match producer.await {
                Ok(ticks) => debug!("Producer for {} emitted {} line(s)", identity, ticks),
                Err(e) => error!("Producer task for {} panicked: {}", identity, e),
            }
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }

    pub async fn session_info(&self, identity: &str) -> Option<SessionInfo> {
        self.sessions.info(identity).await
    }

    pub async fn active_sessions(&self) -> Vec<SessionInfo> {
        self.sessions.snapshot().await
    }

    pub async fn participant_metadata(&self, identity: &str) -> Option<Value> {
        self.metadata.read().await.get(identity).cloned()
    }
}

#[async_trait]
impl RoomHandler for SessionEngine {
    async fn on_participant_connected(&self, identity: &str, metadata: Option<&str>) {
        info!("Participant connected: {}", identity);

        let Some(raw) = metadata else { return };
        match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => {
                info!("Participant {} metadata: {}", identity, parsed);
                self.metadata
                    .write()
                    .await
                    .insert(identity.to_string(), parsed);
            }
            Err(e) => warn!("Failed to parse metadata for {}: {}", identity, e),
        }
    }

    async fn on_participant_disconnected(&self, identity: &str) {
        info!("Participant disconnected: {}", identity);

        self.stop_translation(identity).await;
        self.metadata.write().await.remove(identity);
    }

    async fn on_data_received(&self, payload: &[u8], sender: &str, _kind: PacketKind) {
        let message: ControlMessage = match serde_json::from_slice(payload) {
            Ok(message) => message,
            Err(e) => {
                warn!("Received invalid control payload from {}: {}", sender, e);
                return;
            }
        };

        info!("Received {} from {}", message.action, sender);

        match message.action.as_str() {
            "start_translation" => {
                self.start_translation(sender, message.settings.unwrap_or_default())
                    .await;
            }
            "stop_translation" => self.stop_translation(sender).await,
            other => debug!("Ignoring unknown action {:?} from {}", other, sender),
        }
    }
}
