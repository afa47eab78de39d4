use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum OutreachError {
    ConfigurationIntegrity(String),
    Validation(String),
    NotFound(String),
    InvalidTransition(String),
    Conflict(String),
    Serialization(String),
    Storage(String),
    FileOperation(String),
    Config(String),
}

impl OutreachError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            OutreachError::ConfigurationIntegrity(_) => "E001",
            OutreachError::Validation(_) => "E002",
            OutreachError::NotFound(_) => "E003",
            OutreachError::InvalidTransition(_) => "E004",
            OutreachError::Serialization(_) => "E005",
            OutreachError::Storage(_) => "E006",
            OutreachError::FileOperation(_) => "E007",
            OutreachError::Config(_) => "E008",
            OutreachError::Conflict(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            OutreachError::ConfigurationIntegrity(_) => "Configuration Integrity Error",
            OutreachError::Validation(_) => "Validation Error",
            OutreachError::NotFound(_) => "Resource Not Found",
            OutreachError::InvalidTransition(_) => "Invalid Status Transition",
            OutreachError::Serialization(_) => "Serialization Error",
            OutreachError::Storage(_) => "Storage Error",
            OutreachError::FileOperation(_) => "File Operation Error",
            OutreachError::Config(_) => "Configuration Error",
            OutreachError::Conflict(_) => "Resource Conflict",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            OutreachError::ConfigurationIntegrity(msg)
            | OutreachError::Validation(msg)
            | OutreachError::NotFound(msg)
            | OutreachError::InvalidTransition(msg)
            | OutreachError::Conflict(msg)
            | OutreachError::Serialization(msg)
            | OutreachError::Storage(msg)
            | OutreachError::FileOperation(msg)
            | OutreachError::Config(msg) => msg,
        }
    }

    /// HTTP 状态码映射（Admin API 使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            OutreachError::Validation(_) => StatusCode::BAD_REQUEST,
            OutreachError::NotFound(_) => StatusCode::NOT_FOUND,
            OutreachError::InvalidTransition(_) | OutreachError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            OutreachError::ConfigurationIntegrity(_)
            | OutreachError::Serialization(_)
            | OutreachError::Storage(_)
            | OutreachError::FileOperation(_)
            | OutreachError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for OutreachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for OutreachError {}

// 便捷的构造函数
impl OutreachError {
    pub fn configuration_integrity<T: Into<String>>(msg: T) -> Self {
        OutreachError::ConfigurationIntegrity(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        OutreachError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        OutreachError::NotFound(msg.into())
    }

    pub fn invalid_transition<T: Into<String>>(msg: T) -> Self {
        OutreachError::InvalidTransition(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        OutreachError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        OutreachError::Serialization(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        OutreachError::Storage(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        OutreachError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        OutreachError::Config(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for OutreachError {
    fn from(err: std::io::Error) -> Self {
        OutreachError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for OutreachError {
    fn from(err: serde_json::Error) -> Self {
        OutreachError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for OutreachError {
    fn from(err: csv::Error) -> Self {
        OutreachError::Serialization(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for OutreachError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        OutreachError::Serialization(format!("xlsx write failed: {}", err))
    }
}

impl From<calamine::XlsxError> for OutreachError {
    fn from(err: calamine::XlsxError) -> Self {
        OutreachError::Serialization(format!("xlsx read failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, OutreachError>;
