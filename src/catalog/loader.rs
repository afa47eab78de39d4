//! 营销链接 CSV → Catalog
//!
//! CSV 格式：`category,productId,productName,marketingBaseUrl`（首行为表头）。
//! 读取失败或没有可用行时回退到内置默认目录，只记 warn，不报错。

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{info, warn};

use super::keywords::{KeywordTable, ProductClassifier, SimKeywords};
use super::{Catalog, CatalogEntry};
use crate::config::CatalogConfig;
use crate::errors::{OutreachError, Result};

/// Where the loaded catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Default,
    File(PathBuf),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Default => write!(f, "built-in defaults"),
            CatalogSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct CatalogLoader {
    classifier: ProductClassifier,
}

impl CatalogLoader {
    pub fn new(classifier: ProductClassifier) -> Self {
        Self { classifier }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(ProductClassifier::new(
            KeywordTable::with_extra(&config.extra_keywords),
            SimKeywords::new(&config.esim_keywords, &config.usim_keywords),
        ))
    }

    /// 加载目录；任何读取问题都回退到默认目录
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Catalog {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Catalog source {} unavailable ({}), using built-in defaults",
                    path.display(),
                    e
                );
                return Catalog::default_catalog();
            }
        };

        match self.load_from_reader(file) {
            Ok(entries) if !entries.is_empty() => {
                info!(
                    "Loaded {} catalog entries from {}",
                    entries.len(),
                    path.display()
                );
                Catalog::new(entries, CatalogSource::File(path.to_path_buf()))
            }
            Ok(_) => {
                warn!(
                    "Catalog source {} has no usable rows, using built-in defaults",
                    path.display()
                );
                Catalog::default_catalog()
            }
            Err(e) => {
                warn!(
                    "Failed to read catalog source {}: {}, using built-in defaults",
                    path.display(),
                    e
                );
                Catalog::default_catalog()
            }
        }
    }

    /// 解析 CSV 内容，返回可用条目（跳过字段不足或 URL 为空的行）
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<CatalogEntry>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        // 按字节读取，非 UTF-8 的单元格做有损解码，不影响其他行
        for (row_idx, result) in csv_reader.byte_records().enumerate() {
            let row_num = row_idx + 2; // 1-based，跳过 header
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => {
                    return Err(OutreachError::file_operation(format!(
                        "Row {}: read failed: {}",
                        row_num, e
                    )));
                }
                Err(e) => {
                    warn!("Catalog row {}: CSV parse error, skipped: {}", row_num, e);
                    continue;
                }
            };

            if record.len() < 4 {
                warn!("Catalog row {}: expected 4 fields, got {}", row_num, record.len());
                continue;
            }

            let field = |idx: usize| String::from_utf8_lossy(record.get(idx).unwrap_or_default());
            let product_id = field(1);
            let product_name = field(2);
            let base_url = field(3);
            if base_url.is_empty() {
                warn!("Catalog row {}: empty marketing URL, skipped", row_num);
                continue;
            }
            if let Err(e) = url::Url::parse(&base_url) {
                warn!(
                    "Catalog row {}: marketing URL is not absolute ({}), skipped: {}",
                    row_num, e, base_url
                );
                continue;
            }

            let class = self.classifier.classify(&product_name);
            entries.push(CatalogEntry {
                country_code: class.country_code,
                country_name: class.country_name,
                sim_type: class.sim_type,
                product_name: product_name.to_string(),
                base_url: base_url.to_string(),
                product_id: product_id.to_string(),
            });
        }

        Ok(entries)
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(ProductClassifier::default())
    }
}
