pub mod config;
pub mod http;
pub mod room;
pub mod session;

pub use config::Config;
pub use http::{create_router, AppState};
pub use room::{
    DataMessage, NatsRoomLink, PacketKind, PresenceMessage, RoomEvent, RoomHandler, RoomLink,
    SendError,
};
pub use session::{
    AckMessage, ControlMessage, EngineTiming, SessionEngine, SessionInfo, TranslationSettings,
    VoiceGender,
};
