//! 商品名 → 国家 / SIM 类型 分类
//!
//! The keyword table is plain data: an ordered list of
//! `(keyword, country_code, country_name)` tuples. Lookup always tries the
//! longest keyword first so that e.g. `인도네시아` wins over `인도` and
//! `동유럽` over `유럽`; equal-length keywords keep table order.

use crate::catalog::SimType;
use crate::config::KeywordConfig;

/// eSIM 关键字（优先于 USIM）
pub const DEFAULT_ESIM_KEYWORDS: &[&str] = &["이심", "esim", "e심"];

/// USIM 关键字
pub const DEFAULT_USIM_KEYWORDS: &[&str] = &["유심", "usim"];

/// 无法识别国家时使用的兜底分类
pub const UNKNOWN_COUNTRY_CODE: &str = "ETC";
pub const UNKNOWN_COUNTRY_NAME: &str = "기타";

/// (keyword, country_code, country_name)
pub const DEFAULT_COUNTRY_KEYWORDS: &[(&str, &str, &str)] = &[
    ("우즈베키스탄", "UZ", "우즈베키스탄"),
    ("카자흐스탄", "KZ", "카자흐스탄"),
    ("모로코", "MA", "모로코"),
    ("이집트", "EG", "이집트"),
    ("튀니지", "TN", "튀니지"),
    ("탄자니아", "TZ", "탄자니아"),
    ("싱가포르", "SG", "싱가포르"),
    ("말레이시아", "MY", "말레이시아"),
    ("태국", "TH", "태국"),
    ("유럽", "EU", "유럽"),
    ("영국", "GB", "영국"),
    ("괌", "GU", "괌"),
    ("로타", "GU", "괌"),
    ("티니안", "GU", "괌"),
    ("사이판", "GU", "괌"),
    ("러시아", "RU", "러시아"),
    ("발칸", "EU", "유럽"),
    ("동유럽", "EU", "유럽"),
    ("몬테네그로", "ME", "몬테네그로"),
    ("알바니아", "AL", "알바니아"),
    ("벨라루스", "BY", "벨라루스"),
    ("사우디", "SA", "사우디아라비아"),
    ("두바이", "AE", "아랍에미리트"),
    ("터키", "TR", "터키"),
    ("요르단", "JO", "요르단"),
    ("중동", "AE", "아랍에미리트"),
    ("미국", "US", "미국"),
    ("하와이", "US", "미국"),
    ("뉴욕", "US", "미국"),
    ("캐나다", "CA", "캐나다"),
    ("토론토", "CA", "캐나다"),
    ("밴쿠버", "CA", "캐나다"),
    ("일본", "JP", "일본"),
    ("후쿠오카", "JP", "일본"),
    ("도쿄", "JP", "일본"),
    ("오사카", "JP", "일본"),
    ("인도네시아", "ID", "인도네시아"),
    ("발리", "ID", "인도네시아"),
    ("자카르타", "ID", "인도네시아"),
    ("한국", "KR", "한국"),
    ("라오스", "LA", "라오스"),
    ("비엔티안", "LA", "라오스"),
    ("루앙프라방", "LA", "라오스"),
    ("방비엥", "LA", "라오스"),
    ("중국", "CN", "중국"),
    ("상하이", "CN", "중국"),
    ("베트남", "VN", "베트남"),
    ("나트랑", "VN", "베트남"),
    ("푸꾸옥", "VN", "베트남"),
    ("다낭", "VN", "베트남"),
    ("몽골", "MN", "몽골"),
    ("울란바토르", "MN", "몽골"),
    ("대만", "TW", "대만"),
    ("가오슝", "TW", "대만"),
    ("타이베이", "TW", "대만"),
    ("홍콩", "HK", "홍콩"),
    ("마카오", "HK", "홍콩마카오"),
    ("호주", "AU", "호주"),
    ("브리즈번", "AU", "호주"),
    ("시드니", "AU", "호주"),
    ("인도", "IN", "인도"),
    ("델리", "IN", "인도"),
    ("뭄바이", "IN", "인도"),
    ("필리핀", "PH", "필리핀"),
    ("세부", "PH", "필리핀"),
    ("보홀", "PH", "필리핀"),
    ("보라카이", "PH", "필리핀"),
    ("조지아", "GE", "조지아"),
    ("아르메니아", "AM", "아르메니아"),
    ("이스라엘", "IL", "이스라엘"),
    ("네팔", "NP", "네팔"),
    ("부탄", "BT", "부탄"),
    ("방글라데시", "BD", "방글라데시"),
    ("아부다비", "AE", "아랍에미리트"),
    ("카타르", "QA", "카타르"),
    ("쿠웨이트", "KW", "쿠웨이트"),
    ("멕시코", "MX", "멕시코"),
    ("스리랑카", "LK", "스리랑카"),
    ("브루나이", "BN", "브루나이"),
    ("콜롬비아", "CO", "콜롬비아"),
    ("브라질", "BR", "브라질"),
    ("칠레", "CL", "칠레"),
    ("페루", "PE", "페루"),
    ("아르헨티나", "AR", "아르헨티나"),
    ("파키스탄", "PK", "파키스탄"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryKeyword {
    pub keyword: String,
    pub country_code: String,
    pub country_name: String,
}

/// Result of classifying a product name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductClass {
    pub country_code: String,
    pub country_name: String,
    pub sim_type: SimType,
}

/// Ordered country keyword table, longest keyword first.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<CountryKeyword>,
}

impl KeywordTable {
    pub fn new(entries: Vec<CountryKeyword>) -> Self {
        let mut entries: Vec<CountryKeyword> = entries
            .into_iter()
            .filter(|e| !e.keyword.trim().is_empty())
            .map(|e| CountryKeyword {
                keyword: e.keyword.trim().to_lowercase(),
                ..e
            })
            .collect();
        // sort_by is stable: equal lengths keep insertion order
        entries.sort_by(|a, b| b.keyword.chars().count().cmp(&a.keyword.chars().count()));
        Self { entries }
    }

    /// 默认表 + 配置追加的关键字
    pub fn with_extra(extra: &[KeywordConfig]) -> Self {
        let mut entries: Vec<CountryKeyword> = DEFAULT_COUNTRY_KEYWORDS
            .iter()
            .map(|(keyword, code, name)| CountryKeyword {
                keyword: keyword.to_string(),
                country_code: code.to_string(),
                country_name: name.to_string(),
            })
            .collect();
        entries.extend(extra.iter().map(|k| CountryKeyword {
            keyword: k.keyword.clone(),
            country_code: k.country_code.clone(),
            country_name: k.country_name.clone(),
        }));
        Self::new(entries)
    }

    pub fn entries(&self) -> &[CountryKeyword] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the country for a product name; `None` when no keyword matches.
    pub fn find_country(&self, product_name: &str) -> Option<&CountryKeyword> {
        let name = product_name.to_lowercase();
        self.entries.iter().find(|e| name.contains(&e.keyword))
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::with_extra(&[])
    }
}

/// eSIM / USIM keyword sets.
#[derive(Debug, Clone)]
pub struct SimKeywords {
    esim: Vec<String>,
    usim: Vec<String>,
}

impl SimKeywords {
    pub fn new(esim: &[String], usim: &[String]) -> Self {
        let normalize = |list: &[String]| -> Vec<String> {
            list.iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };
        Self {
            esim: normalize(esim),
            usim: normalize(usim),
        }
    }

    /// eSIM wins over USIM; neither defaults to eSIM.
    pub fn detect(&self, product_name: &str) -> SimType {
        let name = product_name.to_lowercase();
        if self.esim.iter().any(|k| name.contains(k.as_str())) {
            SimType::Esim
        } else if self.usim.iter().any(|k| name.contains(k.as_str())) {
            SimType::Usim
        } else {
            SimType::Esim
        }
    }
}

impl Default for SimKeywords {
    fn default() -> Self {
        let esim: Vec<String> = DEFAULT_ESIM_KEYWORDS.iter().map(|k| k.to_string()).collect();
        let usim: Vec<String> = DEFAULT_USIM_KEYWORDS.iter().map(|k| k.to_string()).collect();
        Self::new(&esim, &usim)
    }
}

/// Combined classifier used by the catalog loader.
#[derive(Debug, Clone, Default)]
pub struct ProductClassifier {
    pub countries: KeywordTable,
    pub sims: SimKeywords,
}

impl ProductClassifier {
    pub fn new(countries: KeywordTable, sims: SimKeywords) -> Self {
        Self { countries, sims }
    }

    pub fn classify(&self, product_name: &str) -> ProductClass {
        let sim_type = self.sims.detect(product_name);
        match self.countries.find_country(product_name) {
            Some(hit) => ProductClass {
                country_code: hit.country_code.clone(),
                country_name: hit.country_name.clone(),
                sim_type,
            },
            None => ProductClass {
                country_code: UNKNOWN_COUNTRY_CODE.to_string(),
                country_name: UNKNOWN_COUNTRY_NAME.to_string(),
                sim_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_keyword_wins() {
        let classifier = ProductClassifier::default();
        assert_eq!(classifier.classify("인도네시아 발리 eSIM").country_code, "ID");
        assert_eq!(classifier.classify("인도 델리 유심").country_code, "IN");
        assert_eq!(classifier.classify("동유럽 발칸 이심").country_code, "EU");
    }

    #[test]
    fn test_macau_is_more_specific_than_hong_kong() {
        let classifier = ProductClassifier::default();
        let class = classifier.classify("홍콩마카오 데이터 무제한");
        assert_eq!(class.country_code, "HK");
        assert_eq!(class.country_name, "홍콩마카오");
    }

    #[test]
    fn test_unknown_country_falls_back_to_etc() {
        let classifier = ProductClassifier::default();
        let class = classifier.classify("남극 탐험 유심");
        assert_eq!(class.country_code, UNKNOWN_COUNTRY_CODE);
        assert_eq!(class.country_name, UNKNOWN_COUNTRY_NAME);
        assert_eq!(class.sim_type, SimType::Usim);
    }

    #[test]
    fn test_esim_keyword_takes_priority() {
        let sims = SimKeywords::default();
        assert_eq!(sims.detect("일본 유심 / eSIM 겸용"), SimType::Esim);
        assert_eq!(sims.detect("일본 USIM"), SimType::Usim);
        assert_eq!(sims.detect("일본 데이터"), SimType::Esim);
    }

    #[test]
    fn test_equal_length_keywords_keep_table_order() {
        let table = KeywordTable::new(vec![
            CountryKeyword {
                keyword: "aa".into(),
                country_code: "X1".into(),
                country_name: "first".into(),
            },
            CountryKeyword {
                keyword: "bb".into(),
                country_code: "X2".into(),
                country_name: "second".into(),
            },
        ]);
        assert_eq!(table.find_country("bb aa").unwrap().country_code, "X1");
    }

    #[test]
    fn test_extra_keywords_extend_defaults() {
        let table = KeywordTable::with_extra(&[KeywordConfig {
            keyword: "스위스".into(),
            country_code: "CH".into(),
            country_name: "스위스".into(),
        }]);
        assert_eq!(table.len(), DEFAULT_COUNTRY_KEYWORDS.len() + 1);
        assert_eq!(table.find_country("스위스 이심").unwrap().country_code, "CH");
    }
}
