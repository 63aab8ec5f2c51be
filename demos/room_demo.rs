// Room translation demo: drives the translator bot end to end over NATS.
//
// 1. The bot joins the demo room and starts its event dispatch loop
// 2. A fake participant "alice" announces herself and requests a
//    French -> English translation over the data channel
// 3. Acknowledgements arrive on alice's unicast inbox while the phrase
//    producer logs synthetic transcript lines
// 4. Alice stops the translation and the bot winds down
//
// Prerequisites:
// - NATS server running: docker run -p 4222:4222 nats
//
// Usage: cargo run --example room_demo

use anyhow::Result;
use base64::Engine;
use futures::stream::StreamExt;
use room_translator::{AckMessage, DataMessage, NatsRoomLink, PresenceMessage, SessionEngine};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

const NATS_URL: &str = "nats://localhost:4222";
const ROOM: &str = "demo-room";

async fn publish_json<T: serde::Serialize>(
    client: &async_nats::Client,
    subject: String,
    message: &T,
) -> Result<()> {
    let payload = serde_json::to_vec(message)?;
    client.publish(subject, payload.into()).await?;
    Ok(())
}

async fn send_control(client: &async_nats::Client, sender: &str, control: &str) -> Result<()> {
    let envelope = DataMessage {
        sender: sender.to_string(),
        payload: base64::engine::general_purpose::STANDARD.encode(control.as_bytes()),
        reliable: true,
    };
    publish_json(client, format!("room.{ROOM}.data.ingress"), &envelope).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // 1. Bot side: join the room and run the engine
    let (link, events) = NatsRoomLink::connect(NATS_URL, ROOM, "translation-bot").await?;
    let engine = SessionEngine::new(Arc::new(link));
    {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine.run(events).await;
        });
    }
    info!("Bot joined room {}", ROOM);

    // 2. Participant side: a raw NATS client standing in for a room client
    let alice = async_nats::connect(NATS_URL).await?;
    let mut inbox = alice
        .subscribe(format!("room.{ROOM}.participant.alice"))
        .await?;

    publish_json(
        &alice,
        format!("room.{ROOM}.presence.connected"),
        &PresenceMessage {
            identity: "alice".to_string(),
            metadata: Some(r#"{"displayName":"Alice"}"#.to_string()),
        },
    )
    .await?;

    send_control(
        &alice,
        "alice",
        r#"{"action":"start_translation","settings":{"inputLang":"fr","outputLang":"en","gender":"male"}}"#,
    )
    .await?;
    info!("alice requested fr -> en translation");

    // 3. Wait for the started ack, then let the producer run for a bit
    if let Some(msg) = inbox.next().await {
        let envelope: DataMessage = serde_json::from_slice(&msg.payload)?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(envelope.payload)?;
        let ack: AckMessage = serde_json::from_slice(&bytes)?;
        info!("alice received ack: {} ({})", ack.action, ack.status);
    }

    sleep(Duration::from_secs(12)).await;

    // 4. Stop and wait for the stopped ack
    send_control(&alice, "alice", r#"{"action":"stop_translation"}"#).await?;
    if let Some(msg) = inbox.next().await {
        let envelope: DataMessage = serde_json::from_slice(&msg.payload)?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(envelope.payload)?;
        let ack: AckMessage = serde_json::from_slice(&bytes)?;
        info!("alice received ack: {} ({})", ack.action, ack.status);
    }

    engine.shutdown().await;
    info!("Demo complete");

    Ok(())
}
