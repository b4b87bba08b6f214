//! 整合測試 - 以實際的 JPEG / PNG 驗證縮圖產生流程
//!
//! 每個測試在獨立的暫存目錄中建立 `public/assets` 結構

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, SystemTime};

use gallery_thumbnailer::component::ThumbnailGenerator;
use gallery_thumbnailer::component::thumbnail_generator::RunSummary;
use gallery_thumbnailer::config::Config;
use image::{ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

const REAL_PHOTOS: &str = "public/assets/real-photos";
const THUMBS: &str = "public/assets/thumbs";
const CATEGORIES: &str = "public/assets/categories";

fn write_image(path: &Path, width: u32, height: u32, format: ImageFormat) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_pixel(width, height, Rgb([150, 110, 70]))
        .save_with_format(path, format)
        .unwrap();
    // 來源檔時間設在過去，避免與縮圖落在同一個時間刻度
    set_mtime(path, SystemTime::now() - Duration::from_secs(3600));
}

fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

fn run(root: &Path) -> RunSummary {
    let config = Config::from_dir(root).unwrap();
    ThumbnailGenerator::new(config, Arc::new(AtomicBool::new(false)))
        .run()
        .unwrap()
}

fn thumbs_dir(root: &Path) -> PathBuf {
    root.join(THUMBS)
}

/// 測試 1: 重複執行不會重新產生
#[test]
fn test_second_run_generates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join(REAL_PHOTOS);
    write_image(&photos.join("a.jpg"), 640, 480, ImageFormat::Jpeg);
    write_image(&photos.join("b.png"), 320, 240, ImageFormat::Png);

    let first = run(temp_dir.path()).top_level.unwrap();
    assert_eq!(first.total, 2);
    assert_eq!(first.generated, 2);

    let second = run(temp_dir.path()).top_level.unwrap();
    assert_eq!(second.total, 2);
    assert_eq!(second.generated, 0, "第二次執行不應重新產生縮圖");
    assert_eq!(second.skipped, 2);
}

/// 測試 2: 來源檔更新後重新產生
#[test]
fn test_touched_source_is_regenerated() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join(REAL_PHOTOS);
    write_image(&photos.join("a.jpg"), 640, 480, ImageFormat::Jpeg);
    write_image(&photos.join("b.jpg"), 640, 480, ImageFormat::Jpeg);

    run(temp_dir.path());
    set_mtime(
        &photos.join("a.jpg"),
        SystemTime::now() + Duration::from_secs(3600),
    );

    let report = run(temp_dir.path()).top_level.unwrap();
    assert_eq!(report.generated, 1);
    assert_eq!(report.skipped, 1);
}

/// 測試 3: 維持比例縮小，不放大
#[test]
fn test_resize_preserves_aspect_without_enlargement() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join(REAL_PHOTOS);
    write_image(&photos.join("wide.jpg"), 1200, 800, ImageFormat::Jpeg);
    write_image(&photos.join("narrow.png"), 300, 200, ImageFormat::Png);

    run(temp_dir.path());

    let wide = image::image_dimensions(thumbs_dir(temp_dir.path()).join("wide.webp")).unwrap();
    assert_eq!(wide, (480, 320));

    let narrow =
        image::image_dimensions(thumbs_dir(temp_dir.path()).join("narrow.webp")).unwrap();
    assert_eq!(narrow, (300, 200));
}

/// 測試 4: 非允許副檔名不列入候選
#[test]
fn test_unsupported_extensions_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join(REAL_PHOTOS);
    write_image(&photos.join("chair.jpg"), 100, 100, ImageFormat::Jpeg);
    write_image(&photos.join("spinner.gif"), 100, 100, ImageFormat::Gif);
    fs::write(photos.join("notes.txt"), "price list").unwrap();

    let report = run(temp_dir.path()).top_level.unwrap();

    assert_eq!(report.total, 1);
    assert!(report.failures.is_empty());
    assert!(!thumbs_dir(temp_dir.path()).join("spinner.webp").exists());
    assert!(!thumbs_dir(temp_dir.path()).join("notes.webp").exists());
}

/// 測試 5: 只為存在的分類建立縮圖目錄
#[test]
fn test_category_discovery() {
    let temp_dir = TempDir::new().unwrap();
    let categories = temp_dir.path().join(CATEGORIES);
    write_image(&categories.join("A").join("one.jpg"), 100, 80, ImageFormat::Jpeg);
    write_image(&categories.join("B").join("two.png"), 100, 80, ImageFormat::Png);

    let summary = run(temp_dir.path());

    assert!(categories.join("A").join("thumbs").join("one.webp").exists());
    assert!(categories.join("B").join("thumbs").join("two.webp").exists());
    assert!(!categories.join("C").exists());
    assert_eq!(summary.categories.len(), 2);

    // 第二次執行時 thumbs 子目錄不應被當成分類或候選檔案
    let summary = run(temp_dir.path());
    assert_eq!(summary.categories.len(), 2);
    assert!(summary.categories.iter().all(|(_, r)| r.total == 1 && r.generated == 0));
}

/// 測試 6: 單一損毀檔案不影響其他檔案
#[test]
fn test_corrupted_image_is_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join(REAL_PHOTOS);
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        write_image(&photos.join(name), 640, 480, ImageFormat::Jpeg);
    }
    fs::write(photos.join("broken.jpg"), "this is not an image").unwrap();

    let summary = run(temp_dir.path());
    let report = summary.top_level.as_ref().unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.generated, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file_name, "broken.jpg");
    assert!(!thumbs_dir(temp_dir.path()).join("broken.webp").exists());
    assert_eq!(summary.total_failures(), 1);
}

/// 測試 6b: 超過 WebP 尺寸上限的窄長圖只記為失敗
#[test]
fn test_oversized_image_does_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join(REAL_PHOTOS);
    write_image(&photos.join("a.jpg"), 640, 480, ImageFormat::Jpeg);
    write_image(&photos.join("b_tall.png"), 100, 17_000, ImageFormat::Png);
    write_image(&photos.join("c.jpg"), 640, 480, ImageFormat::Jpeg);

    let report = run(temp_dir.path()).top_level.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.generated, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file_name, "b_tall.png");
    assert!(thumbs_dir(temp_dir.path()).join("a.webp").exists());
    assert!(thumbs_dir(temp_dir.path()).join("c.webp").exists());
    assert!(!thumbs_dir(temp_dir.path()).join("b_tall.webp").exists());
}

/// 測試 6c: 指向圖片的符號連結會產生縮圖
#[cfg(unix)]
#[test]
fn test_symlinked_photo_is_generated() {
    let temp_dir = TempDir::new().unwrap();
    let shared = temp_dir.path().join("shared").join("chair.jpg");
    write_image(&shared, 640, 480, ImageFormat::Jpeg);
    let photos = temp_dir.path().join(REAL_PHOTOS);
    fs::create_dir_all(&photos).unwrap();
    std::os::unix::fs::symlink(&shared, photos.join("linked.jpg")).unwrap();

    let report = run(temp_dir.path()).top_level.unwrap();

    assert_eq!(report.total, 1);
    assert_eq!(report.generated, 1);
    assert!(thumbs_dir(temp_dir.path()).join("linked.webp").exists());
}

/// 測試 7: 縮圖命名
#[test]
fn test_thumbnail_naming() {
    let temp_dir = TempDir::new().unwrap();
    write_image(
        &temp_dir.path().join(REAL_PHOTOS).join("photo.JPG"),
        200,
        100,
        ImageFormat::Jpeg,
    );
    write_image(
        &temp_dir.path().join(CATEGORIES).join("doors").join("chair.jpg"),
        200,
        100,
        ImageFormat::Jpeg,
    );

    run(temp_dir.path());

    assert!(thumbs_dir(temp_dir.path()).join("photo.webp").exists());
    assert!(
        temp_dir
            .path()
            .join(CATEGORIES)
            .join("doors")
            .join("thumbs")
            .join("chair.webp")
            .exists()
    );
}

/// 測試 8: 設定檔覆寫縮圖寬度
#[test]
fn test_settings_file_overrides_width() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("thumbnails.json"),
        r#"{ "thumb_width": 200, "quality": 60 }"#,
    )
    .unwrap();
    write_image(
        &temp_dir.path().join(REAL_PHOTOS).join("bed.jpg"),
        800,
        400,
        ImageFormat::Jpeg,
    );

    run(temp_dir.path());

    let dims = image::image_dimensions(thumbs_dir(temp_dir.path()).join("bed.webp")).unwrap();
    assert_eq!(dims, (200, 100));
}
