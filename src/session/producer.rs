use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use super::settings::TranslationSettings;

// Demonstration sentences emitted while no real pipeline is attached.
// Fixed data, not configuration.
const EN_PHRASES: [&str; 4] = [
    "Hello, how are you today?",
    "The weather is nice.",
    "I'm testing the translation system.",
    "This is a demo of live translation.",
];

const HI_PHRASES: [&str; 4] = [
    "नमस्ते, आज आप कैसे हैं?",
    "मौसम अच्छा है।",
    "मैं अनुवाद प्रणाली का परीक्षण कर रहा हूं।",
    "यह लाइव अनुवाद का एक डेमो है।",
];

const FR_PHRASES: [&str; 4] = [
    "Bonjour, comment allez-vous aujourd'hui?",
    "Le temps est agréable.",
    "Je teste le système de traduction.",
    "C'est une démonstration de traduction en direct.",
];

const ES_PHRASES: [&str; 4] = [
    "Hola, ¿cómo estás hoy?",
    "El clima está agradable.",
    "Estoy probando el sistema de traducción.",
    "Esta es una demostración de traducción en vivo.",
];

/// Phrase table for a language code. Matches on the primary subtag (first
/// two characters); anything unknown falls back to English.
fn phrases_for(lang: &str) -> &'static [&'static str] {
    match lang.get(..2) {
        Some("en") => &EN_PHRASES,
        Some("hi") => &HI_PHRASES,
        Some("fr") => &FR_PHRASES,
        Some("es") => &ES_PHRASES,
        _ => &EN_PHRASES,
    }
}

/// Spawn the background producer for one session.
///
/// The task cycles through the phrase table for the session's input
/// language, logging one line per tick. It checks `active` before each
/// emission and terminates once the flag clears, so a stopped session stops
/// producing within one tick interval. The returned handle resolves to the
/// number of lines emitted; it is never aborted.
pub fn spawn_phrase_producer(
    identity: String,
    settings: TranslationSettings,
    active: Arc<AtomicBool>,
    tick_interval: Duration,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let source = phrases_for(&settings.input_lang);
        let mut ticks: u64 = 0;

        loop {
            if !active.load(Ordering::SeqCst) {
                break;
            }

            let phrase = source[ticks as usize % source.len()];
            info!(
                "[transcription] {} ({} -> {}) {}",
                identity, settings.input_lang, settings.output_lang, phrase
            );
            ticks += 1;

            tokio::time::sleep(tick_interval).await;
        }

        ticks
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_primary_subtag() {
        assert_eq!(phrases_for("en")[0], "Hello, how are you today?");
        assert_eq!(phrases_for("en-US")[1], "The weather is nice.");
        assert_eq!(phrases_for("fr")[0], "Bonjour, comment allez-vous aujourd'hui?");
        assert_eq!(phrases_for("es")[3], "Esta es una demostración de traducción en vivo.");
        assert_eq!(phrases_for("hi")[0], "नमस्ते, आज आप कैसे हैं?");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(phrases_for("de"), &EN_PHRASES[..]);
        assert_eq!(phrases_for(""), &EN_PHRASES[..]);
        assert_eq!(phrases_for("e"), &EN_PHRASES[..]);
    }

    #[tokio::test]
    async fn producer_terminates_after_flag_clears() {
        let active = Arc::new(AtomicBool::new(true));
        let handle = spawn_phrase_producer(
            "alice".to_string(),
            TranslationSettings::default(),
            Arc::clone(&active),
            Duration::from_millis(10),
        );

        tokio::time::sleep(Duration::from_millis(35)).await;
        active.store(false, Ordering::SeqCst);

        let ticks = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("producer did not terminate after deactivation")
            .expect("producer task panicked");

        // First line is emitted immediately, then one per tick until the
        // flag was observed cleared.
        assert!(ticks >= 1);
    }

    #[tokio::test]
    async fn producer_never_emits_when_spawned_inactive() {
        let active = Arc::new(AtomicBool::new(false));
        let handle = spawn_phrase_producer(
            "bob".to_string(),
            TranslationSettings::default(),
            Arc::clone(&active),
            Duration::from_millis(10),
        );

        let ticks = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("producer did not terminate")
            .expect("producer task panicked");

        assert_eq!(ticks, 0);
    }
}
