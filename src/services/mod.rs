//! Service layer
//!
//! Business rules shared by the public API, the admin API and the CLI.
//! Services own slug derivation, validation and locale resolution; storage
//! only persists.

mod catalog;
mod content;
mod inbox;
mod notifier;
mod orders;
mod search;

pub use catalog::*;
pub use content::*;
pub use inbox::*;
pub use notifier::{HttpNotifier, NoopNotifier, Notifier, notifier_from_config};
pub use orders::*;
pub use search::*;

use crate::content::SlugField;
use crate::errors::{HandlineError, Result};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
/// 超出此页码的请求一律返回空页，offset 保持在 i64 范围内
pub const MAX_PAGE: u64 = 1_000_000;

/// 规范化分页参数：page 限制在 1..=MAX_PAGE，page_size 限制在 1..=MAX_PAGE_SIZE
pub fn normalize_paging(page: Option<u64>, page_size: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).clamp(1, MAX_PAGE);
    let page_size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, page_size)
}

/// 编辑器提交时的 slug
///
/// 新建：从英文标题派生，除非显式给出；编辑：保留已存储的 slug，除非显式覆盖。
pub(crate) fn resolve_slug(
    existing: Option<&str>,
    explicit: Option<&str>,
    en_title: &str,
) -> Result<String> {
    let mut field = match existing {
        Some(slug) => SlugField::existing(slug),
        None => {
            let mut field = SlugField::default();
            field.on_title_change(en_title);
            field
        }
    };
    if let Some(explicit) = explicit.filter(|s| !s.trim().is_empty()) {
        field.override_with(explicit);
    }

    let slug = field.resolve(en_title);
    if slug.is_empty() {
        return Err(HandlineError::validation(
            "A slug could not be derived; provide a title with letters or digits",
        ));
    }
    Ok(slug)
}

/// 把可选字符串中的空白值归为 None
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HandlineError::validation(format!("{} is required", field)));
    }
    Ok(())
}

/// 列表字段：去空白项、去重，保持原顺序
pub(crate) fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim().to_string();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
