use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 縮圖存在且修改時間嚴格晚於來源檔時視為最新
///
/// 只比對時間戳，內容被替換但時間戳未變的來源檔不會被偵測到
pub fn is_thumbnail_fresh(source: &Path, thumbnail: &Path) -> Result<bool> {
    let thumb_modified = match fs::metadata(thumbnail) {
        Ok(metadata) => metadata
            .modified()
            .with_context(|| format!("Failed to read mtime: {}", thumbnail.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to stat: {}", thumbnail.display()));
        }
    };

    let source_modified = fs::metadata(source)
        .and_then(|m| m.modified())
        .with_context(|| format!("Failed to read mtime: {}", source.display()))?;

    Ok(thumb_modified > source_modified)
}
