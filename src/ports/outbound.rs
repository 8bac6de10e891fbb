//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, RemoteFile, StickerSet};
use tokio::io::AsyncWrite;

/// Raw Telegram Bot API calls used by the sticker client.
///
/// Implementations map every non-success reply into `DomainError` without
/// interpreting it; call-specific meaning (e.g. 400 on `getStickerSet`) is
/// decided by the use cases.
#[async_trait::async_trait]
pub trait BotApiPort: Send + Sync {
    /// `getStickerSet?name=...`
    async fn get_sticker_set(&self, name: &str) -> Result<StickerSet, DomainError>;

    /// `getFile?file_id=...`. Returns the remote storage path of the blob.
    async fn get_file(&self, file_id: &str) -> Result<RemoteFile, DomainError>;

    /// Stream the blob at `file_path` into `dest`. Returns the number of bytes written.
    ///
    /// Read failures are `Network`, write failures are `Storage`. `dest` is not
    /// flushed; the caller owns the handle.
    async fn download_file(
        &self,
        file_path: &str,
        file_id: &str,
        dest: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, DomainError>;

    /// `getUpdates`. Elements are returned undecoded so one malformed update
    /// cannot fail the whole snapshot.
    async fn get_updates(&self) -> Result<Vec<serde_json::Value>, DomainError>;

    /// `sendMessage?chat_id=...&text=...`. Reply body is not interpreted beyond success.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), DomainError>;
}
