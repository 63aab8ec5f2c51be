//! Room transport boundary
//!
//! The engine never talks to the wire directly. It consumes `RoomEvent`s
//! delivered by a transport adapter and sends acknowledgements back through
//! the `RoomLink` trait. `NatsRoomLink` is the concrete adapter used by the
//! binary; tests substitute their own `RoomLink` implementation.

pub mod link;
pub mod messages;
pub mod nats;

pub use link::{dispatch, PacketKind, RoomEvent, RoomHandler, RoomLink, SendError};
pub use messages::{DataMessage, PresenceMessage};
pub use nats::NatsRoomLink;
