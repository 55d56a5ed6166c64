use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::info;

use super::converters::{brand_to_active_model, model_to_brand};
use super::{SeaOrmStorage, retry};
use crate::errors::{HandlineError, Result};
use crate::storage::models::Brand;

use migration::entities::brand;

impl SeaOrmStorage {
    pub async fn get_brand(&self, id: &str) -> Result<Option<Brand>> {
        let db = &self.db;
        let model = retry::with_retry("get_brand", self.retry_config, || async {
            brand::Entity::find_by_id(id).one(db).await
        })
        .await?;
        Ok(model.map(model_to_brand))
    }

    pub async fn get_brand_by_slug(&self, slug: &str) -> Result<Option<Brand>> {
        let db = &self.db;
        let model = retry::with_retry("get_brand_by_slug", self.retry_config, || async {
            brand::Entity::find()
                .filter(brand::Column::Slug.eq(slug))
                .one(db)
                .await
        })
        .await?;
        Ok(model.map(model_to_brand))
    }

    /// 品牌数量很少，不分页；按 sort_order、name 排序
    pub async fn load_brands(&self) -> Result<Vec<Brand>> {
        let db = &self.db;
        let models = retry::with_retry("load_brands", self.retry_config, || async {
            brand::Entity::find()
                .order_by_asc(brand::Column::SortOrder)
                .order_by_asc(brand::Column::Name)
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_brand).collect())
    }

    pub async fn insert_brand(&self, b: &Brand) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_brand", self.retry_config, || async {
            brand::Entity::insert(brand_to_active_model(b, true))
                .exec_without_returning(db)
                .await
        })
        .await?;
        self.invalidate_count_cache();
        info!("Brand created: {}", b.slug);
        Ok(())
    }

    pub async fn update_brand(&self, b: &Brand) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("update_brand", self.retry_config, || async {
            brand::Entity::update_many()
                .set(brand_to_active_model(b, false))
                .filter(brand::Column::Id.eq(b.id.as_str()))
                .exec(db)
                .await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!("Brand '{}' not found", b.id)));
        }
        self.invalidate_count_cache();
        info!("Brand updated: {}", b.slug);
        Ok(())
    }

    pub async fn delete_brand(&self, id: &str) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("delete_brand", self.retry_config, || async {
            brand::Entity::delete_by_id(id).exec(db).await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!("Brand '{}' not found", id)));
        }
        self.invalidate_count_cache();
        info!("Brand deleted: {}", id);
        Ok(())
    }

    pub async fn count_brands(&self) -> Result<u64> {
        let db = &self.db;
        self.cached_count("brands".to_string(), || async {
            brand::Entity::find().count(db).await
        })
        .await
    }
}
