use super::codec::{ResizeSpec, ThumbnailCodec, WebpCodec};
use super::pairing::{DirectoryPairing, plan_category_pairings};
use super::processor::{DirectoryProcessor, DirectoryReport};
use crate::config::Config;
use anyhow::{Result, bail};
use console::style;
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// 整體執行結果
#[derive(Debug)]
pub struct RunSummary {
    pub elapsed: Duration,
    /// 首頁照片目錄的結果，目錄不存在時為 `None`
    pub top_level: Option<DirectoryReport>,
    /// 各分類的結果（分類名稱, 結果）
    pub categories: Vec<(String, DirectoryReport)>,
    pub interrupted: bool,
}

impl RunSummary {
    /// 所有目錄的失敗總數
    #[must_use]
    pub fn total_failures(&self) -> usize {
        self.top_level
            .iter()
            .chain(self.categories.iter().map(|(_, report)| report))
            .map(|report| report.failures.len())
            .sum()
    }

    /// 中斷的執行視為未完成，讓呼叫端以非零結束碼結束
    pub fn ensure_completed(&self) -> Result<()> {
        if self.interrupted {
            bail!("Interrupted before all thumbnails were generated");
        }
        Ok(())
    }
}

/// 縮圖批次產生器
///
/// 先處理首頁照片目錄，再依序處理每個分類目錄
pub struct ThumbnailGenerator {
    config: Config,
    codec: Box<dyn ThumbnailCodec>,
    shutdown_signal: Arc<AtomicBool>,
}

impl ThumbnailGenerator {
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self::with_codec(config, Box::new(WebpCodec), shutdown_signal)
    }

    pub fn with_codec(
        config: Config,
        codec: Box<dyn ThumbnailCodec>,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            codec,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        println!("\n{}\n", style("=== Image Optimizer ===").cyan().bold());
        let start = Instant::now();
        let settings = &self.config.settings;

        let processor = DirectoryProcessor::new(
            self.codec.as_ref(),
            ResizeSpec {
                width: settings.thumb_width,
                quality: settings.quality,
            },
            settings.parallel,
            &self.shutdown_signal,
        );

        println!("{}", style("Processing real-photos...").dim());
        let top_level = processor.process(&DirectoryPairing::top_level(settings))?;

        let mut categories = Vec::new();
        for pairing in plan_category_pairings(settings)? {
            if self.is_interrupted() {
                break;
            }
            println!("{}", style(format!("Processing {pairing}...")).dim());
            if let Some(report) = processor.process(&pairing)? {
                info!(
                    "{}: {} new thumbnails ({} total images)",
                    pairing, report.generated, report.total
                );
                categories.push((pairing.to_string(), report));
            }
        }

        let interrupted = self.is_interrupted();
        if interrupted {
            warn!("Received shutdown signal, stopped early");
        }

        let summary = RunSummary {
            elapsed: start.elapsed(),
            top_level,
            categories,
            interrupted,
        };
        self.print_summary(&summary);

        Ok(summary)
    }

    fn is_interrupted(&self) -> bool {
        self.shutdown_signal.load(Ordering::SeqCst)
    }

    fn print_summary(&self, summary: &RunSummary) {
        println!();
        if summary.interrupted {
            println!("{}", style("Interrupted").yellow().bold());
        }
        println!(
            "{} Done in {:.1}s",
            style("✓").green(),
            summary.elapsed.as_secs_f64()
        );

        if let Some(report) = &summary.top_level {
            println!(
                "   {} new thumbnails generated ({} total images)",
                style(report.generated).green(),
                report.total
            );
        }

        let failures = summary.total_failures();
        if failures > 0 {
            println!("   {} failed", style(failures).red());
        }
        println!();

        info!(
            "Thumbnail generation finished in {:.1}s, failures: {}",
            summary.elapsed.as_secs_f64(),
            failures
        );
    }
}
