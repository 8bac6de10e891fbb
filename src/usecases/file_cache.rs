//! Local sticker cache: `(pack, file_id)` -> `<images_dir>/<pack>/<file_id>.webp`.
//!
//! A hit is a regular file at that path. On a miss the blob is resolved with
//! `getFile`, streamed to `<file_id>.webp.part`, synced, and renamed into
//! place, so a cache hit never sees a half-written file.
//!
//! Concurrent misses for the same key share one download through the
//! in-flight registry. Each download runs in its own task, so it finishes and
//! drops its registry entry even when every caller has given up waiting.

use crate::domain::{DomainError, cache_path};
use crate::ports::BotApiPort;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

type SharedDownload = Shared<BoxFuture<'static, Result<(), DomainError>>>;

/// Key: relative cache path. One pending download per key.
type InflightDownloads = Arc<Mutex<HashMap<String, SharedDownload>>>;

pub struct FileCache {
    api: Arc<dyn BotApiPort>,
    base_dir: PathBuf,
    inflight: InflightDownloads,
}

impl FileCache {
    pub fn new(api: Arc<dyn BotApiPort>, base_dir: impl AsRef<Path>) -> Self {
        Self {
            api,
            base_dir: base_dir.as_ref().to_path_buf(),
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Ensure the sticker is on disk and return its relative path `"{pack}/{file_id}.webp"`.
    ///
    /// `pack_name` and `file_id` must each be a single path component.
    pub async fn resolve_local_file(
        &self,
        pack_name: &str,
        file_id: &str,
    ) -> Result<String, DomainError> {
        cache_path::check_segment("pack name", pack_name)?;
        cache_path::check_segment("file id", file_id)?;

        let relative = cache_path::relative_path(pack_name, file_id);
        let absolute = cache_path::absolute_path(&self.base_dir, pack_name, file_id);

        if is_cached(&absolute).await? {
            debug!(path = %absolute.display(), "cache hit");
            return Ok(relative);
        }

        let download = self
            .inflight
            .lock()
            .await
            .entry(relative.clone())
            .or_insert_with(|| {
                debug!(pack = pack_name, file_id, "cache miss, starting download");
                spawn_download(
                    Arc::clone(&self.api),
                    Arc::clone(&self.inflight),
                    relative.clone(),
                    self.base_dir.clone(),
                    pack_name.to_string(),
                    file_id.to_string(),
                )
            })
            .clone();

        download.await?;
        Ok(relative)
    }
}

/// Only a regular file counts; a directory at the cache path is a miss.
async fn is_cached(absolute: &Path) -> Result<bool, DomainError> {
    match fs::metadata(absolute).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(DomainError::storage("check cached sticker", e)),
    }
}

/// Start the download task. The returned future only waits on it; dropping
/// every waiter does not cancel the task.
fn spawn_download(
    api: Arc<dyn BotApiPort>,
    inflight: InflightDownloads,
    key: String,
    base_dir: PathBuf,
    pack_name: String,
    file_id: String,
) -> SharedDownload {
    let task = tokio::spawn(download_and_release(
        api, inflight, key, base_dir, pack_name, file_id,
    ));
    async move {
        task.await
            .map_err(|e| DomainError::Storage(format!("download task failed: {}", e)))?
    }
    .boxed()
    .shared()
}

/// Runs the download, then removes its registry entry whatever the outcome.
async fn download_and_release(
    api: Arc<dyn BotApiPort>,
    inflight: InflightDownloads,
    key: String,
    base_dir: PathBuf,
    pack_name: String,
    file_id: String,
) -> Result<(), DomainError> {
    let absolute = cache_path::absolute_path(&base_dir, &pack_name, &file_id);
    // A previous download for this key may have landed after the caller's check.
    let result = match is_cached(&absolute).await {
        Ok(true) => Ok(()),
        Ok(false) => download_to_cache(&*api, &base_dir, &pack_name, &file_id).await,
        Err(e) => Err(e),
    };
    inflight.lock().await.remove(&key);
    if let Err(e) = &result {
        warn!(pack = %pack_name, file_id = %file_id, error = %e, "sticker download failed");
    }
    result
}

async fn download_to_cache(
    api: &dyn BotApiPort,
    base_dir: &Path,
    pack_name: &str,
    file_id: &str,
) -> Result<(), DomainError> {
    fs::create_dir_all(cache_path::pack_dir(base_dir, pack_name))
        .await
        .map_err(|e| DomainError::storage("create pack directory", e))?;

    let remote = api.get_file(file_id).await?;

    let absolute = cache_path::absolute_path(base_dir, pack_name, file_id);
    let partial = cache_path::partial_path(&absolute);

    let written = match write_partial(api, &remote.file_path, file_id, &partial).await {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&partial, &absolute).await {
        let _ = fs::remove_file(&partial).await;
        return Err(DomainError::storage("move sticker into cache", e));
    }

    info!(
        pack = pack_name,
        file_id,
        bytes = written,
        path = %absolute.display(),
        "sticker cached"
    );
    Ok(())
}

/// The file handle lives only in this scope and is closed on every return.
async fn write_partial(
    api: &dyn BotApiPort,
    file_path: &str,
    file_id: &str,
    partial: &Path,
) -> Result<u64, DomainError> {
    let mut file = fs::File::create(partial)
        .await
        .map_err(|e| DomainError::storage("create partial file", e))?;
    let written = api.download_file(file_path, file_id, &mut file).await?;
    file.flush()
        .await
        .map_err(|e| DomainError::storage("flush partial file", e))?;
    file.sync_all()
        .await
        .map_err(|e| DomainError::storage("sync partial file", e))?;
    Ok(written)
}
