use anyhow::{Context, Result};
use clap::Parser;
use room_translator::{
    create_router, AppState, Config, EngineTiming, NatsRoomLink, RoomLink, SessionEngine,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "room-translator", about = "Translation bot for real-time rooms")]
struct Args {
    /// Config file path, without extension
    #[arg(long, default_value = "config/room-translator")]
    config: String,

    /// Room name override
    #[arg(long)]
    room: Option<String>,

    /// Transport server URL override
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(room) = args.room {
        cfg.room.name = room;
    }
    if let Some(url) = args.url {
        cfg.room.url = url;
    }

    info!("room-translator v0.1.0");
    info!("Loaded config: {}", cfg.service.name);
    info!("Room: {} at {}", cfg.room.name, cfg.room.url);

    let (link, events) = NatsRoomLink::connect(&cfg.room.url, &cfg.room.name, &cfg.room.bot_identity)
        .await
        .context("Failed to join room")?;
    let link = Arc::new(link);

    let timing = EngineTiming {
        load_delay: Duration::from_secs(cfg.engine.load_delay_secs),
        tick_interval: Duration::from_secs(cfg.engine.tick_interval_secs),
    };
    let engine = SessionEngine::with_timing(link.clone(), timing);

    // HTTP status API
    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind HTTP API to {}", addr))?;
    info!("HTTP status API listening on {}", addr);

    let router = create_router(AppState::new(engine.clone()));
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("HTTP server error: {}", e);
        }
    });

    // Event dispatch runs until ctrl-c or the transport closes the stream
    let dispatcher = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine.run(events).await;
        })
    };

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");

    dispatcher.abort();
    engine.shutdown().await;
    link.disconnect().await?;

    info!("Bot stopped");
    Ok(())
}
