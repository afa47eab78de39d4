//! 内置默认目录（CSV 缺失或不可读时使用）

use super::{CatalogEntry, SimType};

const DEFAULT_BASE_URL: &str = "https://smartstore.naver.com/usimstore";

/// (country_code, country_name)
const DEFAULT_COUNTRIES: &[(&str, &str)] = &[
    ("EU", "유럽"),
    ("VN", "베트남"),
    ("TH", "태국"),
    ("JP", "일본"),
    ("US", "미국"),
    ("CN", "중국"),
    ("TW", "대만"),
    ("PH", "필리핀"),
    ("ID", "인도네시아"),
    ("MY", "말레이시아"),
    ("HK", "홍콩마카오"),
    ("AU", "호주"),
    ("SG", "싱가포르"),
    ("IN", "인도"),
    ("LA", "라오스"),
    ("ETC", "기타"),
];

pub fn default_entries() -> Vec<CatalogEntry> {
    DEFAULT_COUNTRIES
        .iter()
        .flat_map(|(code, name)| {
            [SimType::Usim, SimType::Esim].into_iter().map(move |sim| {
                let label = match sim {
                    SimType::Usim => "유심",
                    SimType::Esim => "eSIM",
                };
                CatalogEntry {
                    country_code: code.to_string(),
                    country_name: name.to_string(),
                    sim_type: sim,
                    product_name: format!("{} {}", name, label),
                    base_url: DEFAULT_BASE_URL.to_string(),
                    product_id: format!("{}-{}", code.to_lowercase(), sim),
                }
            })
        })
        .collect()
}
