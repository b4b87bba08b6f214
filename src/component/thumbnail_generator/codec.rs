use anyhow::{Context, Result, anyhow, bail};
use image::{DynamicImage, GenericImageView, ImageReader, imageops::FilterType};
use log::debug;
use std::path::Path;

/// 縮圖尺寸與編碼設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    /// 目標寬度，只縮小不放大
    pub width: u32,
    /// WebP 品質（0-100）
    pub quality: u8,
}

/// 解碼 → 縮放 → 編碼，回傳輸出檔案內容
///
/// 寫入由呼叫端負責
pub trait ThumbnailCodec: Send + Sync {
    fn render(&self, source: &Path, spec: &ResizeSpec) -> Result<Vec<u8>>;
}

/// libwebp 單邊上限
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// 計算維持比例且不放大的輸出尺寸
#[must_use]
pub fn target_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    if width <= target_width || width == 0 {
        return (width, height);
    }

    let scaled = (f64::from(height) * f64::from(target_width) / f64::from(width)).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled_height = (scaled as u32).max(1);
    (target_width, scaled_height)
}

/// `image` 解碼與縮放，`webp` 有損編碼
#[derive(Debug, Default, Clone, Copy)]
pub struct WebpCodec;

impl WebpCodec {
    fn decode(source: &Path) -> Result<DynamicImage> {
        ImageReader::open(source)
            .with_context(|| format!("Failed to open {}", source.display()))?
            .with_guessed_format()
            .with_context(|| format!("Failed to detect format of {}", source.display()))?
            .decode()
            .with_context(|| format!("Failed to decode {}", source.display()))
    }

    fn resize(img: DynamicImage, target_width: u32) -> DynamicImage {
        let (width, height) = img.dimensions();
        let (new_width, new_height) = target_dimensions(width, height, target_width);
        if (new_width, new_height) == (width, height) {
            return img;
        }
        img.resize_exact(new_width, new_height, FilterType::Lanczos3)
    }

    /// libwebp 只接受 8-bit RGB / RGBA
    fn to_encodable(img: DynamicImage) -> DynamicImage {
        if matches!(img, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) {
            img
        } else if img.color().has_alpha() {
            DynamicImage::ImageRgba8(img.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(img.to_rgb8())
        }
    }
}

impl ThumbnailCodec for WebpCodec {
    fn render(&self, source: &Path, spec: &ResizeSpec) -> Result<Vec<u8>> {
        let img = Self::decode(source)?;
        let (width, height) = img.dimensions();

        let img = Self::to_encodable(Self::resize(img, spec.width));
        debug!(
            "Encoding {}: {}x{} -> {}x{}",
            source.display(),
            width,
            height,
            img.width(),
            img.height()
        );

        if img.width() > WEBP_MAX_DIMENSION || img.height() > WEBP_MAX_DIMENSION {
            bail!(
                "{}x{} exceeds the WebP limit of {WEBP_MAX_DIMENSION}px per side: {}",
                img.width(),
                img.height(),
                source.display()
            );
        }

        let encoder = webp::Encoder::from_image(&img)
            .map_err(|reason| anyhow!("WebP encoder rejected {}: {reason}", source.display()))?;
        // `encode` 在 libwebp 回報錯誤時會 panic，改用會回傳錯誤的版本
        let memory = encoder
            .encode_simple(false, f32::from(spec.quality))
            .map_err(|e| anyhow!("WebP encoding failed for {}: {e:?}", source.display()))?;
        Ok(memory.to_vec())
    }
}
