//! PPE hub: categories and their ordered sections

use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::info;

use super::converters::{
    model_to_ppe_category, model_to_ppe_section, ppe_category_to_active_model,
    ppe_section_to_active_model,
};
use super::{SeaOrmStorage, retry};
use crate::errors::{HandlineError, Result};
use crate::storage::models::{PpeCategory, PpeSection};

use migration::entities::{ppe_category, ppe_section};

impl SeaOrmStorage {
    pub async fn get_ppe_category(&self, id: &str) -> Result<Option<PpeCategory>> {
        let db = &self.db;
        let model = retry::with_retry("get_ppe_category", self.retry_config, || async {
            ppe_category::Entity::find_by_id(id).one(db).await
        })
        .await?;
        Ok(model.map(model_to_ppe_category))
    }

    pub async fn get_ppe_category_by_slug(&self, slug: &str) -> Result<Option<PpeCategory>> {
        let db = &self.db;
        let model = retry::with_retry("get_ppe_category_by_slug", self.retry_config, || async {
            ppe_category::Entity::find()
                .filter(ppe_category::Column::Slug.eq(slug))
                .one(db)
                .await
        })
        .await?;
        Ok(model.map(model_to_ppe_category))
    }

    pub async fn load_ppe_categories(&self) -> Result<Vec<PpeCategory>> {
        let db = &self.db;
        let models = retry::with_retry("load_ppe_categories", self.retry_config, || async {
            ppe_category::Entity::find()
                .order_by_asc(ppe_category::Column::SortOrder)
                .order_by_asc(ppe_category::Column::Title)
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_ppe_category).collect())
    }

    pub async fn insert_ppe_category(&self, c: &PpeCategory) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_ppe_category", self.retry_config, || async {
            ppe_category::Entity::insert(ppe_category_to_active_model(c, true))
                .exec_without_returning(db)
                .await
        })
        .await?;
        self.invalidate_count_cache();
        info!("PPE category created: {}", c.slug);
        Ok(())
    }

    pub async fn update_ppe_category(&self, c: &PpeCategory) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("update_ppe_category", self.retry_config, || async {
            ppe_category::Entity::update_many()
                .set(ppe_category_to_active_model(c, false))
                .filter(ppe_category::Column::Id.eq(c.id.as_str()))
                .exec(db)
                .await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!(
                "PPE category '{}' not found",
                c.id
            )));
        }
        self.invalidate_count_cache();
        info!("PPE category updated: {}", c.slug);
        Ok(())
    }

    /// 删除分类时一并删除其下所有 section（同一事务）
    pub async fn delete_ppe_category(&self, id: &str) -> Result<()> {
        let txn = self.db.begin().await?;

        ppe_section::Entity::delete_many()
            .filter(ppe_section::Column::CategoryId.eq(id))
            .exec(&txn)
            .await?;
        let result = ppe_category::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(HandlineError::not_found(format!(
                "PPE category '{}' not found",
                id
            )));
        }
        txn.commit().await?;

        self.invalidate_count_cache();
        info!("PPE category deleted: {}", id);
        Ok(())
    }

    pub async fn count_ppe_categories(&self) -> Result<u64> {
        let db = &self.db;
        self.cached_count("ppe_categories".to_string(), || async {
            ppe_category::Entity::find().count(db).await
        })
        .await
    }

    pub async fn get_ppe_section(&self, id: &str) -> Result<Option<PpeSection>> {
        let db = &self.db;
        let model = retry::with_retry("get_ppe_section", self.retry_config, || async {
            ppe_section::Entity::find_by_id(id).one(db).await
        })
        .await?;
        Ok(model.map(model_to_ppe_section))
    }

    /// 按 sort_order 排列
    pub async fn load_ppe_sections(&self, category_id: &str) -> Result<Vec<PpeSection>> {
        let db = &self.db;
        let models = retry::with_retry("load_ppe_sections", self.retry_config, || async {
            ppe_section::Entity::find()
                .filter(ppe_section::Column::CategoryId.eq(category_id))
                .order_by_asc(ppe_section::Column::SortOrder)
                .order_by_asc(ppe_section::Column::CreatedAt)
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_ppe_section).collect())
    }

    pub async fn insert_ppe_section(&self, s: &PpeSection) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_ppe_section", self.retry_config, || async {
            ppe_section::Entity::insert(ppe_section_to_active_model(s, true))
                .exec_without_returning(db)
                .await
        })
        .await?;
        info!("PPE section created in {}: {}", s.category_id, s.id);
        Ok(())
    }

    pub async fn update_ppe_section(&self, s: &PpeSection) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("update_ppe_section", self.retry_config, || async {
            ppe_section::Entity::update_many()
                .set(ppe_section_to_active_model(s, false))
                .filter(ppe_section::Column::Id.eq(s.id.as_str()))
                .exec(db)
                .await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!(
                "PPE section '{}' not found",
                s.id
            )));
        }
        info!("PPE section updated: {}", s.id);
        Ok(())
    }

    pub async fn delete_ppe_section(&self, id: &str) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("delete_ppe_section", self.retry_config, || async {
            ppe_section::Entity::delete_by_id(id).exec(db).await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!(
                "PPE section '{}' not found",
                id
            )));
        }
        info!("PPE section deleted: {}", id);
        Ok(())
    }
}
