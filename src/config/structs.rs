use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含：
/// - server: 服务器地址、端口、CPU 数量
/// - api: Admin API 前缀、token、CORS
/// - storage: 文档存储后端
/// - logging: 日志配置
/// - catalog: 国家/SIM 目录来源与关键字
/// - dispatch: 发货表格生成参数
/// - notice: 链接通知邮件内容
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub notice: NoticeConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：OD，分隔符：__
    /// 示例：OD__SERVER__PORT=9999
    pub fn load(path: Option<&str>) -> Self {
        use config::{Config, Environment, File};

        let path = path.unwrap_or("config.toml");

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 OD，分隔符 __
            .add_source(
                Environment::with_prefix("OD")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> crate::errors::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::errors::OutreachError::config(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// Admin API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 为空时 Admin API 被禁用
    #[serde(default)]
    pub admin_token: String,
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    #[serde(default = "default_health_prefix")]
    pub health_prefix: String,
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

/// 文档存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// memory | file
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_storage_file_path")]
    pub file_path: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 追加的国家关键字
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordConfig {
    pub keyword: String,
    pub country_code: String,
    pub country_name: String,
}

/// 国家/SIM 目录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// 营销链接 CSV 路径，不存在时使用内置默认目录
    #[serde(default = "default_catalog_source_path")]
    pub source_path: String,
    #[serde(default = "default_esim_keywords")]
    pub esim_keywords: Vec<String>,
    #[serde(default = "default_usim_keywords")]
    pub usim_keywords: Vec<String>,
    #[serde(default)]
    pub extra_keywords: Vec<KeywordConfig>,
}

/// 发货表格配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_order_prefix")]
    pub order_prefix: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_batch_list_limit")]
    pub batch_list_limit: usize,
}

/// 邮件内容配置（提案邮件 / 链接通知邮件）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_company_info")]
    pub company_info: String,
    #[serde(default)]
    pub unsubscribe_url: String,
    /// 提案邮件中的问卷链接
    #[serde(default)]
    pub survey_url: String,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_admin_prefix() -> String {
    "/admin".to_string()
}

fn default_health_prefix() -> String {
    "/health".to_string()
}

fn default_storage_backend() -> String {
    "memory".to_string()
}

fn default_storage_file_path() -> String {
    "data/outreachdesk.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_catalog_source_path() -> String {
    "data/marketing-links/marketing-links.csv".to_string()
}

fn default_esim_keywords() -> Vec<String> {
    crate::catalog::keywords::DEFAULT_ESIM_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}

fn default_usim_keywords() -> Vec<String> {
    crate::catalog::keywords::DEFAULT_USIM_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}

fn default_order_prefix() -> String {
    "RV".to_string()
}

fn default_sheet_name() -> String {
    crate::dispatch::DEFAULT_SHEET_NAME.to_string()
}

fn default_batch_list_limit() -> usize {
    100
}

fn default_company_info() -> String {
    "Outreach Team".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            admin_token: String::new(),
            admin_prefix: default_admin_prefix(),
            health_prefix: default_health_prefix(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            file_path: default_storage_file_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_path: default_catalog_source_path(),
            esim_keywords: default_esim_keywords(),
            usim_keywords: default_usim_keywords(),
            extra_keywords: Vec::new(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            order_prefix: default_order_prefix(),
            sheet_name: default_sheet_name(),
            batch_list_limit: default_batch_list_limit(),
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            company_info: default_company_info(),
            unsubscribe_url: String::new(),
            survey_url: String::new(),
        }
    }
}
