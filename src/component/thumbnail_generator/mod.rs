//! 縮圖批次產生元件
//!
//! 掃描首頁照片與各分類目錄，為尚未產生或已過期的圖片產生 WebP 縮圖

mod codec;
mod main;
mod pairing;
mod processor;

pub use codec::{ResizeSpec, ThumbnailCodec, WebpCodec, target_dimensions};
pub use main::{RunSummary, ThumbnailGenerator};
pub use pairing::{DirectoryPairing, PairingKind, plan_category_pairings};
pub use processor::{DirectoryProcessor, DirectoryReport, ImageFailure, thumbnail_path};
