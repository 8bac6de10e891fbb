//! Bot API payloads. Strict schemas for the few replies the client reads.
//!
//! No HTTP types here; the adapter decodes the envelope and hands these over.

use serde::{Deserialize, Serialize};

/// Generic Bot API reply: `{ ok, result, error_code, description, parameters }`.
/// Only `result` is needed on success; `ok` is checked when present.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub ok: Option<bool>,
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<u16>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseParameters {
    pub retry_after: Option<u64>,
}

/// Result of `getStickerSet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickerSet {
    pub stickers: Vec<Sticker>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sticker {
    /// Bot API 6.6 renamed `thumb` to `thumbnail`; both are accepted.
    #[serde(alias = "thumbnail")]
    pub thumb: PhotoSize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
}

/// Result of `getFile`. `file_path` is what the blob endpoint wants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFile {
    pub file_path: String,
}

/// One element of `getUpdates`. Only updates carrying a `message` are decoded;
/// anything else fails to parse and is skipped by the messenger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub message: UpdateMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMessage {
    pub chat: Chat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub username: Option<String>,
}

impl StickerSet {
    /// Thumbnail file ids in the order Telegram lists the stickers.
    pub fn thumb_file_ids(&self) -> Vec<String> {
        self.stickers
            .iter()
            .map(|s| s.thumb.file_id.clone())
            .collect()
    }
}
