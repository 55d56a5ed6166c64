use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum HandlineError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Serialization(String),
    DateParse(String),
    Auth(String),
    PasswordHash(String),
    Notify(String),
}

impl HandlineError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            HandlineError::DatabaseConfig(_) => "E001",
            HandlineError::DatabaseConnection(_) => "E002",
            HandlineError::DatabaseOperation(_) => "E003",
            HandlineError::FileOperation(_) => "E004",
            HandlineError::Validation(_) => "E005",
            HandlineError::NotFound(_) => "E006",
            HandlineError::Conflict(_) => "E007",
            HandlineError::Serialization(_) => "E008",
            HandlineError::DateParse(_) => "E009",
            HandlineError::Auth(_) => "E010",
            HandlineError::PasswordHash(_) => "E011",
            HandlineError::Notify(_) => "E012",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            HandlineError::DatabaseConfig(_) => "Database Configuration Error",
            HandlineError::DatabaseConnection(_) => "Database Connection Error",
            HandlineError::DatabaseOperation(_) => "Database Operation Error",
            HandlineError::FileOperation(_) => "File Operation Error",
            HandlineError::Validation(_) => "Validation Error",
            HandlineError::NotFound(_) => "Resource Not Found",
            HandlineError::Conflict(_) => "Resource Conflict",
            HandlineError::Serialization(_) => "Serialization Error",
            HandlineError::DateParse(_) => "Date Parse Error",
            HandlineError::Auth(_) => "Authentication Error",
            HandlineError::PasswordHash(_) => "Password Hash Error",
            HandlineError::Notify(_) => "Notification Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            HandlineError::DatabaseConfig(msg)
            | HandlineError::DatabaseConnection(msg)
            | HandlineError::DatabaseOperation(msg)
            | HandlineError::FileOperation(msg)
            | HandlineError::Validation(msg)
            | HandlineError::NotFound(msg)
            | HandlineError::Conflict(msg)
            | HandlineError::Serialization(msg)
            | HandlineError::DateParse(msg)
            | HandlineError::Auth(msg)
            | HandlineError::PasswordHash(msg)
            | HandlineError::Notify(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            HandlineError::Validation(_) | HandlineError::DateParse(_) => StatusCode::BAD_REQUEST,
            HandlineError::NotFound(_) => StatusCode::NOT_FOUND,
            HandlineError::Conflict(_) => StatusCode::CONFLICT,
            HandlineError::Auth(_) => StatusCode::UNAUTHORIZED,
            HandlineError::Notify(_) => StatusCode::BAD_GATEWAY,
            HandlineError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            HandlineError::DatabaseConfig(_)
            | HandlineError::DatabaseOperation(_)
            | HandlineError::FileOperation(_)
            | HandlineError::Serialization(_)
            | HandlineError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the message is safe to show to an API client as-is.
    /// Infrastructure failures are reported with a generic message instead.
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            HandlineError::Validation(_)
                | HandlineError::NotFound(_)
                | HandlineError::Conflict(_)
                | HandlineError::DateParse(_)
                | HandlineError::Auth(_)
        )
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

impl fmt::Display for HandlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for HandlineError {}

// 便捷的构造函数
impl HandlineError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        HandlineError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        HandlineError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        HandlineError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        HandlineError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        HandlineError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        HandlineError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        HandlineError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        HandlineError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        HandlineError::DateParse(msg.into())
    }

    pub fn auth<T: Into<String>>(msg: T) -> Self {
        HandlineError::Auth(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        HandlineError::PasswordHash(msg.into())
    }

    pub fn notify<T: Into<String>>(msg: T) -> Self {
        HandlineError::Notify(msg.into())
    }
}

impl From<sea_orm::DbErr> for HandlineError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一索引冲突（slug 重复）对调用方是业务错误，不是数据库故障
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return HandlineError::Conflict(detail);
        }
        HandlineError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for HandlineError {
    fn from(err: std::io::Error) -> Self {
        HandlineError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for HandlineError {
    fn from(err: serde_json::Error) -> Self {
        HandlineError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for HandlineError {
    fn from(err: chrono::ParseError) -> Self {
        HandlineError::DateParse(err.to_string())
    }
}

impl From<csv::Error> for HandlineError {
    fn from(err: csv::Error) -> Self {
        HandlineError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HandlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            HandlineError::database_config("x"),
            HandlineError::database_connection("x"),
            HandlineError::database_operation("x"),
            HandlineError::file_operation("x"),
            HandlineError::validation("x"),
            HandlineError::not_found("x"),
            HandlineError::conflict("x"),
            HandlineError::serialization("x"),
            HandlineError::date_parse("x"),
            HandlineError::auth("x"),
            HandlineError::password_hash("x"),
            HandlineError::notify("x"),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            HandlineError::validation("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HandlineError::not_found("gone").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HandlineError::conflict("dup").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            HandlineError::database_operation("boom").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = HandlineError::not_found("Product 'x' not found");
        assert_eq!(
            err.to_string(),
            "Resource Not Found: Product 'x' not found"
        );
    }

    #[test]
    fn test_client_facing() {
        assert!(HandlineError::validation("x").is_client_facing());
        assert!(!HandlineError::database_operation("x").is_client_facing());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: HandlineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, HandlineError::Serialization(_)));
    }
}
