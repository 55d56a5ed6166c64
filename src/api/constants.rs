//! API 模块常量定义

/// Access Token Cookie 名称
pub const ACCESS_COOKIE_NAME: &str = "handline_access";

/// Refresh Token Cookie 名称
pub const REFRESH_COOKIE_NAME: &str = "handline_refresh";

/// Refresh cookie 只发往刷新/登出端点
pub const REFRESH_COOKIE_PATH_SUFFIX: &str = "/v1/auth";

/// JWT subject：后台只有一个管理员账户
pub const ADMIN_SUBJECT: &str = "admin";
