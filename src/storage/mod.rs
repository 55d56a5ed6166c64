use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::{Page, SeaOrmStorage};
pub use models::{
    Brand, ClothingAttributes, ContentStats, En374Rating, En388Rating, En407Rating, En511Rating,
    Message, MessageFilter, Post, PostDetails, PostFilter, PostKind, PpeCategory, PpeSection,
    Product, ProductFilter, ProductFlag, SafetyRatings,
};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(&config.database_url)?;
        let storage = SeaOrmStorage::new(config, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
