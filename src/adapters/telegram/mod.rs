//! Telegram Bot API adapter.

pub mod bot_api;
pub mod mapper;
#[cfg(test)]
pub mod mock;

pub use bot_api::HttpBotApi;
