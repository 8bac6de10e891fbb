//! Sticker-pack existence and enumeration.
//!
//! Telegram has no "not found" for sticker sets: `getStickerSet` answers an
//! unknown name with a plain 400. That status is translated here, for this call
//! only; every other failure passes through untouched.

use crate::domain::DomainError;
use crate::ports::BotApiPort;
use std::sync::Arc;
use tracing::{debug, info};

/// Status Telegram returns for unknown sticker sets.
const STATUS_BAD_REQUEST: u16 = 400;

pub struct PackService {
    api: Arc<dyn BotApiPort>,
}

impl PackService {
    pub fn new(api: Arc<dyn BotApiPort>) -> Self {
        Self { api }
    }

    /// Thumbnail file ids of the pack, one per sticker, in Telegram's order.
    pub async fn enumerate_sticker_files(&self, pack_name: &str) -> Result<Vec<String>, DomainError> {
        match self.api.get_sticker_set(pack_name).await {
            Ok(set) => {
                let ids = set.thumb_file_ids();
                info!(pack = pack_name, count = ids.len(), "sticker pack enumerated");
                Ok(ids)
            }
            Err(DomainError::RemoteApi {
                status: STATUS_BAD_REQUEST,
                description,
            }) => {
                debug!(pack = pack_name, %description, "getStickerSet rejected pack");
                Err(DomainError::PackNotFoundOrInvalid(pack_name.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn pack_exists(&self, pack_name: &str) -> Result<bool, DomainError> {
        match self.enumerate_sticker_files(pack_name).await {
            Ok(_) => Ok(true),
            Err(DomainError::PackNotFoundOrInvalid(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
