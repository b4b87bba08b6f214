use crate::config::GeneratorSettings;
use crate::tools::scan_category_dirs;
use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingKind {
    /// 首頁照片目錄
    TopLevel,
    /// 分類目錄，縮圖放在分類內的子目錄
    Category(String),
}

/// 一組來源目錄與輸出目錄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPairing {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub kind: PairingKind,
}

impl DirectoryPairing {
    #[must_use]
    pub fn top_level(settings: &GeneratorSettings) -> Self {
        Self {
            source_dir: settings.input_dir.clone(),
            output_dir: settings.output_dir.clone(),
            kind: PairingKind::TopLevel,
        }
    }
}

impl fmt::Display for DirectoryPairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PairingKind::TopLevel => write!(f, "{}", self.source_dir.display()),
            PairingKind::Category(name) => write!(f, "category {name}"),
        }
    }
}

/// 每個分類子目錄產生一組配對，輸出到 `<分類>/<category_thumbs_dir>`
pub fn plan_category_pairings(settings: &GeneratorSettings) -> Result<Vec<DirectoryPairing>> {
    Ok(scan_category_dirs(&settings.category_dir)?
        .into_iter()
        .map(|category| DirectoryPairing {
            output_dir: category.path.join(&settings.category_thumbs_dir),
            source_dir: category.path,
            kind: PairingKind::Category(category.name),
        })
        .collect())
}
