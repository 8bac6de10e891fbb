//! Core domain layer. No external I/O dependencies.
//!
//! Bot API payload schemas, the error taxonomy, and cache-path formatting.

pub mod cache_path;
pub mod entities;
pub mod errors;

pub use entities::{
    ApiResponse, Chat, PhotoSize, RemoteFile, ResponseParameters, Sticker, StickerSet, Update,
    UpdateMessage,
};
pub use errors::DomainError;
