use super::codec::{ResizeSpec, ThumbnailCodec};
use super::pairing::DirectoryPairing;
use crate::config::THUMBNAIL_EXTENSION;
use crate::tools::{
    SourceImage, ensure_directory_exists, find_orphan_thumbnails, is_existing_directory,
    is_thumbnail_fresh, scan_source_images, write_atomically,
};
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// 單一圖片處理失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub file_name: String,
    pub message: String,
}

/// 單一目錄的處理結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryReport {
    /// 符合副檔名的候選圖片數
    pub total: usize,
    /// 本次新產生（或重新產生）的縮圖數
    pub generated: usize,
    /// 縮圖已是最新而略過的數量
    pub skipped: usize,
    pub failures: Vec<ImageFailure>,
    /// 沒有對應來源圖片的縮圖
    pub orphans: Vec<PathBuf>,
    pub interrupted: bool,
}

#[derive(Debug)]
enum ImageOutcome {
    Generated,
    Fresh,
    Failed(ImageFailure),
    Interrupted,
}

/// 目錄處理器
///
/// 逐一（或以 rayon 平行）處理目錄中的圖片，單張失敗只記錄不中斷
pub struct DirectoryProcessor<'a> {
    codec: &'a dyn ThumbnailCodec,
    spec: ResizeSpec,
    parallel: bool,
    shutdown_signal: &'a AtomicBool,
}

impl<'a> DirectoryProcessor<'a> {
    pub const fn new(
        codec: &'a dyn ThumbnailCodec,
        spec: ResizeSpec,
        parallel: bool,
        shutdown_signal: &'a AtomicBool,
    ) -> Self {
        Self {
            codec,
            spec,
            parallel,
            shutdown_signal,
        }
    }

    /// 處理一組配對，來源目錄不存在時回傳 `None`
    pub fn process(&self, pairing: &DirectoryPairing) -> Result<Option<DirectoryReport>> {
        if !is_existing_directory(&pairing.source_dir) {
            debug!(
                "Source directory missing, skipping: {}",
                pairing.source_dir.display()
            );
            return Ok(None);
        }

        ensure_directory_exists(&pairing.output_dir)?;
        let images = scan_source_images(&pairing.source_dir)?;

        println!(
            "  {} {} → {} images",
            style("📁").dim(),
            pairing.source_dir.display(),
            images.len()
        );

        let progress_bar = create_progress_bar(images.len());
        let outcomes: Vec<ImageOutcome> = if self.parallel {
            images
                .par_iter()
                .map(|image| self.process_with_progress(image, &pairing.output_dir, &progress_bar))
                .collect()
        } else {
            images
                .iter()
                .map(|image| self.process_with_progress(image, &pairing.output_dir, &progress_bar))
                .collect()
        };
        progress_bar.finish_and_clear();

        let mut report = DirectoryReport {
            total: images.len(),
            ..DirectoryReport::default()
        };
        for outcome in outcomes {
            match outcome {
                ImageOutcome::Generated => report.generated += 1,
                ImageOutcome::Fresh => report.skipped += 1,
                ImageOutcome::Failed(failure) => report.failures.push(failure),
                ImageOutcome::Interrupted => report.interrupted = true,
            }
        }

        report.orphans = find_orphan_thumbnails(&pairing.output_dir, &images)?;
        for orphan in &report.orphans {
            warn!("Orphaned thumbnail (no source image): {}", orphan.display());
        }

        Ok(Some(report))
    }

    fn process_with_progress(
        &self,
        image: &SourceImage,
        output_dir: &Path,
        progress_bar: &ProgressBar,
    ) -> ImageOutcome {
        if self.shutdown_signal.load(Ordering::SeqCst) {
            return ImageOutcome::Interrupted;
        }

        progress_bar.set_message(image.file_name.clone());
        let outcome = match self.process_image(image, output_dir) {
            Ok(true) => ImageOutcome::Generated,
            Ok(false) => ImageOutcome::Fresh,
            Err(e) => {
                let message = format!("{e:#}");
                error!("Failed: {} — {}", image.file_name, message);
                progress_bar.suspend(|| {
                    println!(
                        "  {} Failed: {} — {}",
                        style("✗").red(),
                        image.file_name,
                        message
                    );
                });
                ImageOutcome::Failed(ImageFailure {
                    file_name: image.file_name.clone(),
                    message,
                })
            }
        };
        progress_bar.inc(1);
        outcome
    }

    /// 回傳是否實際產生了縮圖
    fn process_image(&self, image: &SourceImage, output_dir: &Path) -> Result<bool> {
        let output_path = thumbnail_path(output_dir, image);

        if is_thumbnail_fresh(&image.path, &output_path)? {
            debug!("Up to date: {}", output_path.display());
            return Ok(false);
        }

        let bytes = self.codec.render(&image.path, &self.spec)?;
        write_atomically(&output_path, &bytes)?;
        debug!("Generated: {}", output_path.display());
        Ok(true)
    }
}

/// 縮圖路徑：相同檔名主體，固定 `.webp` 副檔名
#[must_use]
pub fn thumbnail_path(output_dir: &Path, image: &SourceImage) -> PathBuf {
    output_dir.join(format!("{}.{THUMBNAIL_EXTENSION}", image.stem))
}

fn create_progress_bar(len: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(len as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar
}
