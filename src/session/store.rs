use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::settings::{TranslationSettings, VoiceGender};

/// One participant's active translation.
pub struct TranslationSession {
    pub settings: TranslationSettings,

    /// When the session became active
    pub started_at: DateTime<Utc>,

    /// Soft-cancellation token shared with the phrase producer. Cleared on
    /// stop; the producer observes it at its next tick boundary.
    active: Arc<AtomicBool>,

    /// Producer task handle. Joined on shutdown, never aborted: producers
    /// terminate themselves once `active` clears.
    producer: JoinHandle<u64>,
}

impl TranslationSession {
    pub fn new(
        settings: TranslationSettings,
        active: Arc<AtomicBool>,
        producer: JoinHandle<u64>,
    ) -> Self {
        Self {
            settings,
            started_at: Utc::now(),
            active,
            producer,
        }
    }

    /// Signal the producer to terminate at its next tick.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Take the producer handle for joining at shutdown.
    pub fn into_producer(self) -> JoinHandle<u64> {
        self.producer
    }
}

/// Snapshot of a session for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub identity: String,
    pub input_lang: String,
    pub output_lang: String,
    pub gender: VoiceGender,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
}

impl SessionInfo {
    fn of(identity: &str, session: &TranslationSession) -> Self {
        let duration = Utc::now().signed_duration_since(session.started_at);
        Self {
            identity: identity.to_string(),
            input_lang: session.settings.input_lang.clone(),
            output_lang: session.settings.output_lang.clone(),
            gender: session.settings.gender,
            started_at: session.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
        }
    }
}

/// Active sessions keyed by participant identity.
///
/// Written only by the engine; producers never touch it. The keys are
/// exactly the set of participants with a live producer, modulo the bounded
/// one-tick lag a terminating producer needs to observe its cleared flag.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, TranslationSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, identity: &str) -> bool {
        self.inner.read().await.contains_key(identity)
    }

    /// Insert the session built by `make` unless `identity` already has one.
    /// Returns false without calling `make` when the slot is occupied.
    pub async fn insert_if_absent(
        &self,
        identity: &str,
        make: impl FnOnce() -> TranslationSession,
    ) -> bool {
        let mut inner = self.inner.write().await;
        match inner.entry(identity.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(make());
                true
            }
        }
    }

    pub async fn remove(&self, identity: &str) -> Option<TranslationSession> {
        self.inner.write().await.remove(identity)
    }

    /// Remove and return every session, for shutdown.
    pub async fn drain(&self) -> Vec<(String, TranslationSession)> {
        self.inner.write().await.drain().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn info(&self, identity: &str) -> Option<SessionInfo> {
        self.inner
            .read()
            .await
            .get(identity)
            .map(|session| SessionInfo::of(identity, session))
    }

    pub async fn snapshot(&self) -> Vec<SessionInfo> {
        self.inner
            .read()
            .await
            .iter()
            .map(|(identity, session)| SessionInfo::of(identity, session))
            .collect()
    }
}
