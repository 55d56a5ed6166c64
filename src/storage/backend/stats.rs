use super::SeaOrmStorage;
use crate::errors::Result;
use crate::storage::models::{ContentStats, MessageFilter, PostFilter, PostKind, ProductFilter};

impl SeaOrmStorage {
    /// 后台首页的计数汇总（走 COUNT 缓存）
    pub async fn content_stats(&self) -> Result<ContentStats> {
        let all = ProductFilter::default();
        let published = ProductFilter {
            published_only: true,
            ..Default::default()
        };

        Ok(ContentStats {
            products: self.count_products(&all).await?,
            published_products: self.count_products(&published).await?,
            brands: self.count_brands().await?,
            blog_posts: self.count_posts(&PostFilter::new(PostKind::Blog)).await?,
            case_studies: self.count_posts(&PostFilter::new(PostKind::CaseStudy)).await?,
            careers: self.count_posts(&PostFilter::new(PostKind::Career)).await?,
            ppe_categories: self.count_ppe_categories().await?,
            messages: self.count_messages(&MessageFilter::default()).await?,
            unread_messages: self
                .count_messages(&MessageFilter { unread_only: true })
                .await?,
        })
    }
}
