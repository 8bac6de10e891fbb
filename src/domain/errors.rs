//! Domain errors. Returned by ports and use cases.
//!
//! Adapters map infrastructure errors (reqwest, io, serde) into these. Variants
//! carry strings so a single failure can be cloned out to every waiter of a
//! shared download.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Transport failure: connect, DNS, timeout, interrupted body stream.
    #[error("Network error: {0}")]
    Network(String),

    /// Reply did not match the expected Bot API shape.
    #[error("Remote protocol error: {0}")]
    RemoteProtocol(String),

    /// `getStickerSet` answered with a generic 400. Telegram uses it for unknown packs.
    #[error("Sticker pack not found or invalid: {0}")]
    PackNotFoundOrInvalid(String),

    /// No chat with this username in the current update window.
    #[error("Recipient not found in recent updates: {0}")]
    RecipientNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// HTTP 429: caller may retry after `retry_after` seconds. Never retried here.
    #[error("Rate limited: retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    /// Any other non-success reply from the Bot API.
    #[error("Bot API error {status}: {description}")]
    RemoteApi { status: u16, description: String },
}

impl DomainError {
    pub(crate) fn storage(context: &str, e: impl std::fmt::Display) -> Self {
        DomainError::Storage(format!("{}: {}", context, e))
    }
}
