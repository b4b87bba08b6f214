use serde::Deserialize;
use std::path::PathBuf;

/// 預設縮圖寬度（像素）
pub const DEFAULT_THUMB_WIDTH: u32 = 480;
/// 預設 WebP 編碼品質（0-100）
pub const DEFAULT_QUALITY: u8 = 75;
/// 縮圖輸出副檔名
pub const THUMBNAIL_EXTENSION: &str = "webp";
/// 分類資料夾內的縮圖子目錄名稱
pub const DEFAULT_CATEGORY_THUMBS_DIR: &str = "thumbs";
/// 可覆寫設定的檔案（位於工作目錄）
pub const SETTINGS_FILE_NAME: &str = "thumbnails.json";

/// 縮圖產生器設定
///
/// 所有欄位皆有預設值，`thumbnails.json` 只需列出要覆寫的欄位
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// 首頁照片來源目錄（平面結構）
    pub input_dir: PathBuf,
    /// 首頁照片的縮圖輸出目錄
    pub output_dir: PathBuf,
    /// 分類根目錄，每個子目錄為一個分類
    pub category_dir: PathBuf,
    /// 分類內的縮圖子目錄名稱
    pub category_thumbs_dir: String,
    pub thumb_width: u32,
    pub quality: u8,
    /// 同一目錄內的檔案是否以 rayon 平行處理
    pub parallel: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("public/assets/real-photos"),
            output_dir: PathBuf::from("public/assets/thumbs"),
            category_dir: PathBuf::from("public/assets/categories"),
            category_thumbs_dir: DEFAULT_CATEGORY_THUMBS_DIR.to_string(),
            thumb_width: DEFAULT_THUMB_WIDTH,
            quality: DEFAULT_QUALITY,
            parallel: false,
        }
    }
}

impl GeneratorSettings {
    /// 以指定的根目錄重新定位所有相對路徑
    #[must_use]
    pub fn rooted_at(mut self, root: &std::path::Path) -> Self {
        self.input_dir = root.join(&self.input_dir);
        self.output_dir = root.join(&self.output_dir);
        self.category_dir = root.join(&self.category_dir);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: GeneratorSettings,
}
