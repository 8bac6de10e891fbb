//! Scripted in-memory BotApiPort for use-case tests. Counts every call.

use crate::domain::{DomainError, PhotoSize, RemoteFile, Sticker, StickerSet};
use crate::ports::BotApiPort;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Mock Bot API. Unknown packs answer like Telegram does: 400.
#[derive(Default)]
pub struct MockBotApi {
    packs: HashMap<String, Vec<String>>,
    sticker_set_error: Option<DomainError>,
    blobs: HashMap<String, Vec<u8>>,
    download_error: Option<DomainError>,
    download_delay: Duration,
    updates: Vec<serde_json::Value>,
    sent: Mutex<Vec<(i64, String)>>,
    sticker_set_calls: AtomicUsize,
    get_file_calls: AtomicUsize,
    download_calls: AtomicUsize,
    get_updates_calls: AtomicUsize,
}

impl MockBotApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pack(mut self, name: &str, thumb_ids: &[&str]) -> Self {
        self.packs.insert(
            name.to_string(),
            thumb_ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Every `getStickerSet` fails with `err`.
    pub fn with_sticker_set_error(mut self, err: DomainError) -> Self {
        self.sticker_set_error = Some(err);
        self
    }

    pub fn with_blob(mut self, file_id: &str, bytes: &[u8]) -> Self {
        self.blobs.insert(file_id.to_string(), bytes.to_vec());
        self
    }

    /// Downloads write half the blob, then fail with `err`.
    pub fn with_download_error(mut self, err: DomainError) -> Self {
        self.download_error = Some(err);
        self
    }

    pub fn with_download_delay(mut self, delay: Duration) -> Self {
        self.download_delay = delay;
        self
    }

    pub fn with_updates(mut self, updates: Vec<serde_json::Value>) -> Self {
        self.updates = updates;
        self
    }

    pub fn sticker_set_calls(&self) -> usize {
        self.sticker_set_calls.load(Ordering::SeqCst)
    }

    pub fn get_file_calls(&self) -> usize {
        self.get_file_calls.load(Ordering::SeqCst)
    }

    pub fn download_calls(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn get_updates_calls(&self) -> usize {
        self.get_updates_calls.load(Ordering::SeqCst)
    }

    pub fn sent_messages(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl BotApiPort for MockBotApi {
    async fn get_sticker_set(&self, name: &str) -> Result<StickerSet, DomainError> {
        self.sticker_set_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.sticker_set_error {
            return Err(err.clone());
        }
        match self.packs.get(name) {
            Some(ids) => Ok(StickerSet {
                stickers: ids
                    .iter()
                    .map(|id| Sticker {
                        thumb: PhotoSize {
                            file_id: id.clone(),
                        },
                    })
                    .collect(),
            }),
            None => Err(DomainError::RemoteApi {
                status: 400,
                description: "Bad Request: STICKERSET_INVALID".to_string(),
            }),
        }
    }

    async fn get_file(&self, file_id: &str) -> Result<RemoteFile, DomainError> {
        self.get_file_calls.fetch_add(1, Ordering::SeqCst);
        if !self.blobs.contains_key(file_id) {
            return Err(DomainError::RemoteApi {
                status: 400,
                description: "Bad Request: invalid file_id".to_string(),
            });
        }
        Ok(RemoteFile {
            file_path: format!("thumbnails/{}.webp", file_id),
        })
    }

    async fn download_file(
        &self,
        file_path: &str,
        file_id: &str,
        dest: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, DomainError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(file_path, format!("thumbnails/{}.webp", file_id));
        if !self.download_delay.is_zero() {
            tokio::time::sleep(self.download_delay).await;
        }
        let blob = self.blobs.get(file_id).cloned().unwrap_or_default();
        if let Some(err) = &self.download_error {
            let half = &blob[..blob.len() / 2];
            dest.write_all(half)
                .await
                .map_err(|e| DomainError::Storage(e.to_string()))?;
            return Err(err.clone());
        }
        dest.write_all(&blob)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(blob.len() as u64)
    }

    async fn get_updates(&self) -> Result<Vec<serde_json::Value>, DomainError> {
        self.get_updates_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.updates.clone())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}
