//! Admin API 服务模块
//!
//! - 认证（登录、登出、token 刷新）
//! - 产品、品牌、文章、PPE 的 CRUD
//! - 留言收件箱与统计

pub mod auth;
mod brands;
pub mod error_code;
mod helpers;
mod messages;
mod posts;
mod ppe;
mod products;
pub mod routes;
mod stats;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    api_result, created_response, error_from_handline, error_in, error_response, json_config,
    paginated_response, query_config, success_response,
};

// 重新导出错误码
pub use error_code::{ErrorCode, ErrorScope};

pub(crate) use posts::post_kind;
pub use routes::admin_v1_routes;
