use crate::config::THUMBNAIL_EXTENSION;
use crate::tools::SourceImage;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 找出輸出目錄中沒有對應來源圖片的縮圖
///
/// 僅回報，不刪除
pub fn find_orphan_thumbnails(output_dir: &Path, sources: &[SourceImage]) -> Result<Vec<PathBuf>> {
    if !output_dir.is_dir() {
        return Ok(Vec::new());
    }

    let stems: HashSet<&str> = sources.iter().map(|s| s.stem.as_str()).collect();
    let mut orphans = Vec::new();

    for entry in WalkDir::new(output_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", output_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let is_thumbnail = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == THUMBNAIL_EXTENSION);
        if !is_thumbnail {
            continue;
        }

        let has_source = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stems.contains(stem));
        if !has_source {
            orphans.push(entry.into_path());
        }
    }

    Ok(orphans)
}
