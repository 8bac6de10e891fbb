//! Cache key formatting. `<pack>/<file_id>.webp` is the only representation of a
//! cached sticker; there is no separate index.

use crate::domain::DomainError;
use std::path::{Path, PathBuf};

/// Extension of every cached sticker image.
pub const STICKER_EXTENSION: &str = "webp";

/// Pack names and file ids become single path components. Anything that is
/// not one plain component (separators, `.`, `..`, NUL, empty) is refused.
pub fn check_segment(kind: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\', '\0']) {
        return Err(DomainError::Storage(format!(
            "invalid {} for cache path: {:?}",
            kind, value
        )));
    }
    Ok(())
}

/// Relative cache path handed back to callers: `"{pack}/{file_id}.webp"`.
pub fn relative_path(pack_name: &str, file_id: &str) -> String {
    format!("{}/{}.{}", pack_name, file_id, STICKER_EXTENSION)
}

/// Absolute on-disk location of a cached sticker under `base_dir`.
pub fn absolute_path(base_dir: &Path, pack_name: &str, file_id: &str) -> PathBuf {
    base_dir.join(relative_path(pack_name, file_id))
}

/// Directory holding all cached stickers of one pack.
pub fn pack_dir(base_dir: &Path, pack_name: &str) -> PathBuf {
    base_dir.join(pack_name)
}

/// Temporary path a download is streamed to before being renamed into place.
pub fn partial_path(absolute: &Path) -> PathBuf {
    absolute.with_extension(format!("{}.part", STICKER_EXTENSION))
}
