//! Site-wide search across the catalogue and editorial content

use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;
use crate::content::{Locale, LocalizedText, localized};
use crate::errors::Result;
use crate::storage::{PostFilter, PostKind, ProductFilter, SeaOrmStorage};

pub const DEFAULT_SEARCH_LIMIT: usize = 5;
pub const MAX_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SearchHit {
    pub slug: String,
    pub title: String,
    /// 相对站点根的链接
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct SearchResults {
    pub products: Vec<SearchHit>,
    pub blog: Vec<SearchHit>,
    pub case_studies: Vec<SearchHit>,
    pub careers: Vec<SearchHit>,
    pub ppe: Vec<SearchHit>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.products.len()
            + self.blog.len()
            + self.case_studies.len()
            + self.careers.len()
            + self.ppe.len()
    }
}

pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT)
}

/// 大小写不敏感的子串匹配：本地化标题、旧字段、两种语言的值
fn title_matches(needle: &str, base: &str, locales: Option<&LocalizedText>) -> bool {
    base.to_lowercase().contains(needle)
        || locales.is_some_and(|l| l.contains_ignore_case(needle))
}

pub struct SearchService {
    storage: Arc<SeaOrmStorage>,
}

impl SearchService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn search_all(&self, query: &str, locale: Locale, limit: Option<usize>) -> Result<SearchResults> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(SearchResults::default());
        }
        let limit = clamp_limit(limit);

        let products = self
            .storage
            .load_products(&ProductFilter {
                published_only: true,
                ..Default::default()
            })
            .await?
            .into_iter()
            .filter(|p| title_matches(&needle, &p.name, p.name_locales.as_ref()))
            .take(limit)
            .map(|p| SearchHit {
                title: localized(p.name_locales.as_ref(), locale, &p.name),
                url: format!("/products/{}", p.slug),
                slug: p.slug,
            })
            .collect();

        let ppe = self
            .storage
            .load_ppe_categories()
            .await?
            .into_iter()
            .filter(|c| title_matches(&needle, &c.title, c.title_locales.as_ref()))
            .take(limit)
            .map(|c| SearchHit {
                title: localized(c.title_locales.as_ref(), locale, &c.title),
                url: format!("/ppe/{}", c.slug),
                slug: c.slug,
            })
            .collect();

        Ok(SearchResults {
            products,
            blog: self.search_posts(PostKind::Blog, &needle, locale, limit).await?,
            case_studies: self
                .search_posts(PostKind::CaseStudy, &needle, locale, limit)
                .await?,
            careers: self.search_posts(PostKind::Career, &needle, locale, limit).await?,
            ppe,
        })
    }

    async fn search_posts(
        &self,
        kind: PostKind,
        needle: &str,
        locale: Locale,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let filter = PostFilter {
            published_only: true,
            ..PostFilter::new(kind)
        };
        Ok(self
            .storage
            .load_posts(&filter, None)
            .await?
            .into_iter()
            .filter(|p| title_matches(needle, &p.title, p.title_locales.as_ref()))
            .take(limit)
            .map(|p| SearchHit {
                title: localized(p.title_locales.as_ref(), locale, &p.title),
                url: format!("/{}/{}", kind.route_segment(), p.slug),
                slug: p.slug,
            })
            .collect())
    }
}
