use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// 可產生縮圖的來源格式（不分大小寫）
static REGEX_SUPPORTED_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpe?g|png|webp)$").expect("Invalid regex"));

/// 來源圖片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    /// 完整檔名，用於日誌與錯誤訊息
    pub file_name: String,
    /// 不含副檔名的檔名，決定縮圖檔名
    pub stem: String,
}

impl SourceImage {
    fn from_path(path: PathBuf) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().to_string();
        let stem = path.file_stem()?.to_string_lossy().to_string();
        Some(Self {
            path,
            file_name,
            stem,
        })
    }
}

#[must_use]
pub fn is_supported_image(file_name: &str) -> bool {
    REGEX_SUPPORTED_IMAGE.is_match(file_name)
}

/// 掃描目錄下第一層的圖片檔案，依檔名排序
///
/// 不遞迴，子目錄（例如分類內的 `thumbs`）不會被視為候選檔案
pub fn scan_source_images(directory: &Path) -> Result<Vec<SourceImage>> {
    let mut images = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", directory.display()))?;
        // 以 `Path::is_file` 判斷，指向圖片的符號連結也列入候選
        if !entry.path().is_file() {
            continue;
        }
        if !is_supported_image(&entry.file_name().to_string_lossy()) {
            continue;
        }
        if let Some(image) = SourceImage::from_path(entry.into_path()) {
            images.push(image);
        }
    }

    Ok(images)
}
