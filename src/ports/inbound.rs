//! Inbound ports. Callers (pack management, the operator console) invoke the
//! application through these.

use crate::domain::DomainError;

/// The whole contract the rest of the catalog needs from the sticker client.
#[async_trait::async_trait]
pub trait StickerClientPort: Send + Sync {
    /// True if Telegram knows the pack. Only "not found" becomes `false`;
    /// every other failure is returned as is.
    async fn pack_exists(&self, pack_name: &str) -> Result<bool, DomainError>;

    /// Thumbnail file ids of every sticker in the pack, in Telegram's order.
    async fn enumerate_sticker_files(&self, pack_name: &str) -> Result<Vec<String>, DomainError>;

    /// Make sure `{pack}/{file_id}.webp` exists under the cache root and return that relative path.
    async fn resolve_local_file(&self, pack_name: &str, file_id: &str)
        -> Result<String, DomainError>;

    /// Send `content` to the chat whose username is `recipient`.
    async fn send_message(&self, recipient: &str, content: &str) -> Result<(), DomainError>;
}

/// Input port: UI/CLI drives the client interactively.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive menu until the operator quits. Prompt failures
    /// (closed terminal, Ctrl-C) end the loop with an error.
    async fn run(&self) -> anyhow::Result<()>;
}
