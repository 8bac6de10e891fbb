//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by collaborators/UI into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::{InputPort, StickerClientPort};
pub use outbound::BotApiPort;
