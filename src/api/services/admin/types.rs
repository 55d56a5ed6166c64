//! API 类型定义（后台与公开接口共用）

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::storage::Page;

/// 输出目录常量
pub const TS_EXPORT_PATH: &str = "../admin-panel/src/services/types.generated.ts";

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PaginationInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            page,
            page_size,
            total,
            total_pages: total.div_ceil(page_size.max(1)),
        }
    }
}

impl<T> PaginatedResponse<T> {
    pub fn from_page(page: Page<T>, page_no: u64, page_size: u64) -> Self {
        Self {
            code: 0,
            message: "OK".to_string(),
            pagination: PaginationInfo::new(page_no, page_size, page.total),
            data: page.items,
        }
    }
}

// ============ 认证 ============

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LoginCredentials {
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct AuthSuccessResponse {
    pub message: String,
    /// access token 有效期（秒）
    pub expires_in: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct VerifyResponse {
    pub message: String,
    /// bearer | cookie
    pub method: String,
}

// ============ 查询参数 ============

/// 后台列表查询
#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct AdminListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
    /// 仅产品列表使用
    pub category: Option<String>,
    pub published_only: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct MessageListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub unread_only: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ReadStateRequest {
    pub read: bool,
}

/// 公开接口通用查询：语言 + 分页
#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PublicListQuery {
    pub locale: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub locale: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct OrderQuery {
    pub email: Option<String>,
}

// ============ 健康检查相关类型 ============

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthStorageCheck {
    pub status: String,
    pub storage_type: String,
    pub products_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u32,
    pub checks: HealthChecks,
    pub response_time_ms: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_info() {
        let info = PaginationInfo::new(2, 20, 41);
        assert_eq!(info.total_pages, 3);
        assert_eq!(PaginationInfo::new(1, 20, 0).total_pages, 0);
    }

    #[test]
    fn test_paginated_response_from_page() {
        let page = Page {
            items: vec!["a", "b"],
            total: 12,
        };
        let resp = PaginatedResponse::from_page(page, 1, 2);
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.pagination.total_pages, 6);
    }

    #[test]
    fn export_typescript_types() {
        // 运行此测试会自动生成 TypeScript 类型文件
        // cargo test export_typescript_types -- --nocapture
        use crate::catalog::FacetCounts;
        use crate::content::{Locale, LocalizedList, LocalizedText};
        use crate::services::{
            BrandInput, BrandView, ContactRequest, Order, PostInput, PostView, PpeCategoryInput,
            PpeCategoryView, PpeSectionInput, ProductInput, ProductView, SearchResults,
            SubmitReceipt,
        };
        use crate::storage::ContentStats;

        let cfg = ts_rs::Config::from_env();

        LoginCredentials::export_all(&cfg).expect("Failed to export LoginCredentials");
        AuthSuccessResponse::export_all(&cfg).expect("Failed to export AuthSuccessResponse");
        VerifyResponse::export_all(&cfg).expect("Failed to export VerifyResponse");
        PaginationInfo::export_all(&cfg).expect("Failed to export PaginationInfo");
        AdminListQuery::export_all(&cfg).expect("Failed to export AdminListQuery");
        MessageListQuery::export_all(&cfg).expect("Failed to export MessageListQuery");
        HealthResponse::export_all(&cfg).expect("Failed to export HealthResponse");

        Locale::export_all(&cfg).expect("Failed to export Locale");
        LocalizedText::export_all(&cfg).expect("Failed to export LocalizedText");
        LocalizedList::export_all(&cfg).expect("Failed to export LocalizedList");
        ProductView::export_all(&cfg).expect("Failed to export ProductView");
        ProductInput::export_all(&cfg).expect("Failed to export ProductInput");
        FacetCounts::export_all(&cfg).expect("Failed to export FacetCounts");
        PostView::export_all(&cfg).expect("Failed to export PostView");
        PostInput::export_all(&cfg).expect("Failed to export PostInput");
        BrandView::export_all(&cfg).expect("Failed to export BrandView");
        BrandInput::export_all(&cfg).expect("Failed to export BrandInput");
        PpeCategoryView::export_all(&cfg).expect("Failed to export PpeCategoryView");
        PpeCategoryInput::export_all(&cfg).expect("Failed to export PpeCategoryInput");
        PpeSectionInput::export_all(&cfg).expect("Failed to export PpeSectionInput");
        ContactRequest::export_all(&cfg).expect("Failed to export ContactRequest");
        SubmitReceipt::export_all(&cfg).expect("Failed to export SubmitReceipt");
        Order::export_all(&cfg).expect("Failed to export Order");
        SearchResults::export_all(&cfg).expect("Failed to export SearchResults");
        ContentStats::export_all(&cfg).expect("Failed to export ContentStats");

        println!("TypeScript types exported to {}", TS_EXPORT_PATH);
    }
}
