use base64::Engine;
use room_translator::{
    AckMessage, ControlMessage, DataMessage, PresenceMessage, TranslationSettings, VoiceGender,
};

#[test]
fn test_start_with_explicit_settings() {
    let json = r#"{
        "action": "start_translation",
        "settings": {"inputLang": "fr", "outputLang": "en", "gender": "male"}
    }"#;

    let msg: ControlMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.action, "start_translation");

    let settings = msg.settings.unwrap();
    assert_eq!(settings.input_lang, "fr");
    assert_eq!(settings.output_lang, "en");
    assert_eq!(settings.gender, VoiceGender::Male);
}

#[test]
fn test_empty_settings_take_defaults() {
    let json = r#"{"action": "start_translation", "settings": {}}"#;

    let msg: ControlMessage = serde_json::from_str(json).unwrap();
    let settings = msg.settings.unwrap();
    assert_eq!(settings.input_lang, "en");
    assert_eq!(settings.output_lang, "hi");
    assert_eq!(settings.gender, VoiceGender::Female);
}

#[test]
fn test_missing_settings_is_none() {
    let json = r#"{"action": "stop_translation"}"#;

    let msg: ControlMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.action, "stop_translation");
    assert!(msg.settings.is_none());
}

#[test]
fn test_partial_settings_fill_remaining_defaults() {
    let json = r#"{"action": "start_translation", "settings": {"outputLang": "es"}}"#;

    let settings = serde_json::from_str::<ControlMessage>(json)
        .unwrap()
        .settings
        .unwrap();
    assert_eq!(settings.input_lang, "en");
    assert_eq!(settings.output_lang, "es");
    assert_eq!(settings.gender, VoiceGender::Female);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let json = r#"{
        "action": "start_translation",
        "requestId": 42,
        "settings": {"inputLang": "es", "theme": "dark"}
    }"#;

    let msg: ControlMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.settings.unwrap().input_lang, "es");
}

#[test]
fn test_missing_action_fails_to_parse() {
    let json = r#"{"settings": {"inputLang": "en"}}"#;

    assert!(serde_json::from_str::<ControlMessage>(json).is_err());
}

#[test]
fn test_default_settings() {
    let settings = TranslationSettings::default();
    assert_eq!(settings.input_lang, "en");
    assert_eq!(settings.output_lang, "hi");
    assert_eq!(settings.gender, VoiceGender::Female);
}

#[test]
fn test_ack_wire_format() {
    let started = serde_json::to_string(&AckMessage::translation_started()).unwrap();
    assert_eq!(
        started,
        r#"{"action":"translation_started","status":"success"}"#
    );

    let stopped = serde_json::to_string(&AckMessage::translation_stopped()).unwrap();
    assert_eq!(
        stopped,
        r#"{"action":"translation_stopped","status":"success"}"#
    );
}

#[test]
fn test_gender_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&VoiceGender::Male).unwrap(), r#""male""#);
    assert_eq!(serde_json::to_string(&VoiceGender::Female).unwrap(), r#""female""#);
}

#[test]
fn test_data_message_defaults_to_reliable() {
    let json = r#"{"sender": "alice", "payload": ""}"#;

    let msg: DataMessage = serde_json::from_str(json).unwrap();
    assert!(msg.reliable);
}

#[test]
fn test_data_message_payload_encoding_roundtrip() {
    let control = br#"{"action":"stop_translation"}"#;
    let msg = DataMessage {
        sender: "alice".to_string(),
        payload: base64::engine::general_purpose::STANDARD.encode(control),
        reliable: true,
    };

    let json = serde_json::to_string(&msg).unwrap();
    let parsed: DataMessage = serde_json::from_str(&json).unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&parsed.payload)
        .unwrap();

    assert_eq!(decoded, control);
    assert_eq!(parsed.sender, "alice");
}

#[test]
fn test_presence_without_metadata_omits_field() {
    let msg = PresenceMessage {
        identity: "translation-bot".to_string(),
        metadata: None,
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert_eq!(json, r#"{"identity":"translation-bot"}"#);

    let parsed: PresenceMessage = serde_json::from_str(&json).unwrap();
    assert!(parsed.metadata.is_none());
}

#[test]
fn test_presence_with_metadata() {
    let json = r#"{"identity": "alice", "metadata": "{\"displayName\":\"Alice\"}"}"#;

    let msg: PresenceMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.identity, "alice");
    assert_eq!(msg.metadata.as_deref(), Some(r#"{"displayName":"Alice"}"#));
}
