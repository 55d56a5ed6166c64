//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use super::types::TS_EXPORT_PATH;
use crate::errors::HandlineError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，ts-rs 自动生成 TypeScript 类型。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 产品目录
/// - 4000-4099: 内容（文章、品牌、PPE）
/// - 5000-5099: 留言
/// - 6000-6099: 订单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    AuthFailed = 2000,
    TokenExpired = 2001,
    TokenInvalid = 2002,
    RateLimitExceeded = 2004,

    // 产品目录 3000-3099
    ProductNotFound = 3000,
    ProductSlugExists = 3001,
    InvalidFacet = 3002,
    ExportFailed = 3003,

    // 内容 4000-4099
    ContentNotFound = 4000,
    ContentSlugExists = 4001,
    UnknownPostKind = 4002,
    InvalidContent = 4003,

    // 留言 5000-5099
    MessageNotFound = 5000,
    InvalidContactForm = 5001,
    NotificationFailed = 5002,

    // 订单 6000-6099
    OrderNotFound = 6000,
    OrderEmailRequired = 6001,
}

impl From<&HandlineError> for ErrorCode {
    fn from(err: &HandlineError) -> Self {
        match err {
            HandlineError::Validation(_) | HandlineError::DateParse(_) => ErrorCode::BadRequest,
            HandlineError::NotFound(_) => ErrorCode::NotFound,
            HandlineError::Conflict(_) => ErrorCode::Conflict,
            HandlineError::Auth(_) => ErrorCode::AuthFailed,
            HandlineError::Notify(_) => ErrorCode::NotificationFailed,
            HandlineError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            HandlineError::DatabaseConfig(_)
            | HandlineError::DatabaseOperation(_)
            | HandlineError::FileOperation(_)
            | HandlineError::Serialization(_)
            | HandlineError::PasswordHash(_) => ErrorCode::InternalServerError,
        }
    }
}

impl From<HandlineError> for ErrorCode {
    fn from(err: HandlineError) -> Self {
        ErrorCode::from(&err)
    }
}

/// 各业务域对通用错误码的细化
#[derive(Debug, Clone, Copy)]
pub struct ErrorScope {
    pub not_found: ErrorCode,
    pub conflict: ErrorCode,
    pub invalid: ErrorCode,
}

impl ErrorScope {
    pub const GENERAL: Self = Self {
        not_found: ErrorCode::NotFound,
        conflict: ErrorCode::Conflict,
        invalid: ErrorCode::BadRequest,
    };
    pub const CATALOG: Self = Self {
        not_found: ErrorCode::ProductNotFound,
        conflict: ErrorCode::ProductSlugExists,
        invalid: ErrorCode::InvalidFacet,
    };
    pub const CONTENT: Self = Self {
        not_found: ErrorCode::ContentNotFound,
        conflict: ErrorCode::ContentSlugExists,
        invalid: ErrorCode::InvalidContent,
    };
    pub const INBOX: Self = Self {
        not_found: ErrorCode::MessageNotFound,
        conflict: ErrorCode::Conflict,
        invalid: ErrorCode::InvalidContactForm,
    };
    pub const ORDERS: Self = Self {
        not_found: ErrorCode::OrderNotFound,
        conflict: ErrorCode::Conflict,
        invalid: ErrorCode::OrderEmailRequired,
    };

    pub fn code_for(&self, err: &HandlineError) -> ErrorCode {
        match err {
            HandlineError::NotFound(_) => self.not_found,
            HandlineError::Conflict(_) => self.conflict,
            HandlineError::Validation(_) => self.invalid,
            other => ErrorCode::from(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(serde_json::to_string(&ErrorCode::InvalidFacet).unwrap(), "3002");
    }

    #[test]
    fn test_scope_refines_codes() {
        let not_found = HandlineError::not_found("x");
        assert_eq!(ErrorCode::from(&not_found), ErrorCode::NotFound);
        assert_eq!(ErrorScope::CATALOG.code_for(&not_found), ErrorCode::ProductNotFound);
        assert_eq!(ErrorScope::ORDERS.code_for(&not_found), ErrorCode::OrderNotFound);

        let db = HandlineError::database_operation("boom");
        assert_eq!(
            ErrorScope::CONTENT.code_for(&db),
            ErrorCode::InternalServerError
        );
    }
}
