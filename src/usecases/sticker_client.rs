//! Implements StickerClientPort by composing the pack, cache, and messaging services.

use crate::domain::DomainError;
use crate::ports::{BotApiPort, StickerClientPort};
use crate::usecases::{FileCache, Messenger, PackService};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Sticker client. All three services share one Bot API adapter.
pub struct StickerClient {
    packs: PackService,
    cache: FileCache,
    messenger: Messenger,
}

impl StickerClient {
    pub fn new(api: Arc<dyn BotApiPort>, images_dir: impl AsRef<Path>) -> Self {
        Self {
            packs: PackService::new(Arc::clone(&api)),
            cache: FileCache::new(Arc::clone(&api), images_dir),
            messenger: Messenger::new(api),
        }
    }

    /// Cache root the relative paths returned by `resolve_local_file` are based on.
    pub fn images_dir(&self) -> &Path {
        self.cache.base_dir()
    }
}

#[async_trait]
impl StickerClientPort for StickerClient {
    async fn pack_exists(&self, pack_name: &str) -> Result<bool, DomainError> {
        self.packs.pack_exists(pack_name).await
    }

    async fn enumerate_sticker_files(&self, pack_name: &str) -> Result<Vec<String>, DomainError> {
        self.packs.enumerate_sticker_files(pack_name).await
    }

    async fn resolve_local_file(
        &self,
        pack_name: &str,
        file_id: &str,
    ) -> Result<String, DomainError> {
        self.cache.resolve_local_file(pack_name, file_id).await
    }

    async fn send_message(&self, recipient: &str, content: &str) -> Result<(), DomainError> {
        self.messenger.send_message(recipient, content).await
    }
}
