use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 分類資料夾
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDir {
    pub name: String,
    pub path: PathBuf,
}

/// 列出分類根目錄下第一層的子目錄，根目錄不存在時回傳空列表
pub fn scan_category_dirs(root: &Path) -> Result<Vec<CategoryDir>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut categories = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", root.display()))?;
        if entry.file_type().is_dir() {
            categories.push(CategoryDir {
                name: entry.file_name().to_string_lossy().to_string(),
                path: entry.into_path(),
            });
        }
    }

    Ok(categories)
}
