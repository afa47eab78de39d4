//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::OutreachError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 目录 / 链接错误
/// - 3000-3099: 发货表格 / 批次错误
/// - 4000-4099: 存储与配置错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 目录 / 链接错误 2000-2099
    CatalogIntegrity = 2000,

    // 发货表格 / 批次错误 3000-3099
    BatchInvalidTransition = 3000,
    SheetSerializationFailed = 3001,
    SheetInvalid = 3002,

    // 存储与配置错误 4000-4099
    StorageError = 4000,
    ConfigError = 4001,
}

impl From<OutreachError> for ErrorCode {
    fn from(err: OutreachError) -> Self {
        ErrorCode::from(&err)
    }
}

impl From<&OutreachError> for ErrorCode {
    fn from(err: &OutreachError) -> Self {
        match err {
            OutreachError::ConfigurationIntegrity(_) => ErrorCode::CatalogIntegrity,
            OutreachError::Validation(_) => ErrorCode::BadRequest,
            OutreachError::NotFound(_) => ErrorCode::NotFound,
            OutreachError::InvalidTransition(_) => ErrorCode::BatchInvalidTransition,
            OutreachError::Conflict(_) => ErrorCode::Conflict,
            OutreachError::Serialization(_) => ErrorCode::SheetSerializationFailed,
            OutreachError::Storage(_) | OutreachError::FileOperation(_) => {
                ErrorCode::StorageError
            }
            OutreachError::Config(_) => ErrorCode::ConfigError,
        }
    }
}
