mod atomic_writer;
mod category_scanner;
mod freshness;
mod image_scanner;
mod orphan_finder;
mod path_validator;
mod thumb_url;

pub use atomic_writer::write_atomically;
pub use category_scanner::{CategoryDir, scan_category_dirs};
pub use freshness::is_thumbnail_fresh;
pub use image_scanner::{SourceImage, is_supported_image, scan_source_images};
pub use orphan_finder::find_orphan_thumbnails;
pub use path_validator::{ensure_directory_exists, is_existing_directory};
pub use thumb_url::thumbnail_url_for;
