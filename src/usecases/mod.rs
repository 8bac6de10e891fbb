//! Application use cases. Orchestrate domain logic via ports.

pub mod file_cache;
pub mod messenger;
pub mod pack_service;
pub mod sticker_client;

pub use file_cache::FileCache;
pub use messenger::Messenger;
pub use pack_service::PackService;
pub use sticker_client::StickerClient;
