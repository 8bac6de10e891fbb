//! tg-stickers: Telegram Bot API client for sticker packs, with Hexagonal Architecture.
//!
//! Checks and enumerates sticker packs, mirrors sticker images into a local
//! cache, and notifies chats by username.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
