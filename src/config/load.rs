use crate::config::types::{Config, GeneratorSettings, SETTINGS_FILE_NAME};
use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::fs;
use std::path::Path;

impl Config {
    /// 從工作目錄載入設定，找不到設定檔時使用預設值
    pub fn new() -> Result<Self> {
        Self::from_dir(Path::new("."))
    }

    /// 從指定目錄載入 `thumbnails.json`，相對路徑以該目錄為基準
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let settings = Self::load_settings(&dir.join(SETTINGS_FILE_NAME))?;
        validate_settings(&settings)?;
        Ok(Self {
            settings: settings.rooted_at(dir),
        })
    }

    fn load_settings(path: &Path) -> Result<GeneratorSettings> {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(GeneratorSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

fn validate_settings(settings: &GeneratorSettings) -> Result<()> {
    if settings.thumb_width == 0 {
        bail!("thumb_width must be greater than 0");
    }
    if settings.quality > 100 {
        bail!("quality must be between 0 and 100, got {}", settings.quality);
    }
    if settings.category_thumbs_dir.trim().is_empty() {
        bail!("category_thumbs_dir must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DEFAULT_QUALITY, DEFAULT_THUMB_WIDTH};
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_dir(temp_dir.path()).unwrap();

        assert_eq!(config.settings.thumb_width, DEFAULT_THUMB_WIDTH);
        assert_eq!(config.settings.quality, DEFAULT_QUALITY);
        assert_eq!(config.settings.category_thumbs_dir, "thumbs");
        assert!(!config.settings.parallel);
        assert_eq!(
            config.settings.input_dir,
            temp_dir.path().join("public/assets/real-photos")
        );
    }

    #[test]
    fn test_partial_override() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            r#"{ "thumb_width": 320, "parallel": true }"#,
        )
        .unwrap();

        let config = Config::from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.settings.thumb_width, 320);
        assert!(config.settings.parallel);
        // 未指定的欄位維持預設值
        assert_eq!(config.settings.quality, DEFAULT_QUALITY);
    }

    #[test]
    fn test_malformed_settings_is_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(SETTINGS_FILE_NAME), "{ not json").unwrap();

        assert!(Config::from_dir(temp_dir.path()).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            r#"{ "quality": 150 }"#,
        )
        .unwrap();
        assert!(Config::from_dir(temp_dir.path()).is_err());

        fs::write(
            temp_dir.path().join(SETTINGS_FILE_NAME),
            r#"{ "thumb_width": 0 }"#,
        )
        .unwrap();
        assert!(Config::from_dir(temp_dir.path()).is_err());
    }
}
