pub mod load;
pub mod types;

pub use types::{
    Config, DEFAULT_CATEGORY_THUMBS_DIR, DEFAULT_QUALITY, DEFAULT_THUMB_WIDTH, GeneratorSettings,
    SETTINGS_FILE_NAME, THUMBNAIL_EXTENSION,
};
