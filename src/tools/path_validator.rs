use anyhow::{Context, Result};
use std::path::Path;

/// 路徑存在且為資料夾
#[must_use]
pub fn is_existing_directory(path: &Path) -> bool {
    path.is_dir()
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}
