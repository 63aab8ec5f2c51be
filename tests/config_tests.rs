use room_translator::Config;
use std::fs;

fn write_config(dir: &std::path::Path, contents: &str) -> String {
    let path = dir.join("room-translator.toml");
    fs::write(&path, contents).unwrap();
    dir.join("room-translator").to_string_lossy().into_owned()
}

#[test]
fn test_load_full_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[service]
name = "room-translator"

[service.http]
bind = "127.0.0.1"
port = 8090

[room]
url = "nats://localhost:4222"
name = "knect-translation-room"
bot_identity = "translation-bot"

[engine]
load_delay_secs = 1
tick_interval_secs = 3
"#,
    );

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.service.name, "room-translator");
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 8090);
    assert_eq!(cfg.room.url, "nats://localhost:4222");
    assert_eq!(cfg.room.name, "knect-translation-room");
    assert_eq!(cfg.room.bot_identity, "translation-bot");
    assert_eq!(cfg.engine.load_delay_secs, 1);
    assert_eq!(cfg.engine.tick_interval_secs, 3);
}

#[test]
fn test_missing_engine_section_takes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
[service]
name = "room-translator"

[service.http]
bind = "0.0.0.0"
port = 8080

[room]
url = "nats://nats.internal:4222"
name = "demo"
bot_identity = "bot"
"#,
    );

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.engine.load_delay_secs, 2);
    assert_eq!(cfg.engine.tick_interval_secs, 5);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-config").to_string_lossy().into_owned();

    assert!(Config::load(&path).is_err());
}
