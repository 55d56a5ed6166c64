use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use tracing::info;

use super::converters::{model_to_product, product_to_active_model};
use super::{Page, SeaOrmStorage, retry};
use crate::errors::{HandlineError, Result};
use crate::storage::models::{Product, ProductFilter};

use migration::entities::product;

fn product_condition(filter: &ProductFilter) -> Condition {
    let mut condition = Condition::all();
    if filter.published_only {
        condition = condition.add(product::Column::Published.eq(true));
    }
    if let Some(category) = filter.category.as_deref() {
        condition = condition.add(product::Column::Category.eq(category));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(product::Column::Name.contains(search))
                .add(product::Column::Slug.contains(search)),
        );
    }
    condition
}

impl SeaOrmStorage {
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let db = &self.db;
        let model = retry::with_retry("get_product", self.retry_config, || async {
            product::Entity::find_by_id(id).one(db).await
        })
        .await?;
        Ok(model.map(model_to_product))
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        let db = &self.db;
        let model = retry::with_retry("get_product_by_slug", self.retry_config, || async {
            product::Entity::find()
                .filter(product::Column::Slug.eq(slug))
                .one(db)
                .await
        })
        .await?;
        Ok(model.map(model_to_product))
    }

    /// 不分页，按名称排序（分面过滤在内存中完成）
    pub async fn load_products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let db = &self.db;
        let condition = product_condition(filter);
        let models = retry::with_retry("load_products", self.retry_config, || async {
            product::Entity::find()
                .filter(condition.clone())
                .order_by_asc(product::Column::Name)
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_product).collect())
    }

    /// 后台列表：最近更新的在前
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Product>> {
        let db = &self.db;
        let condition = product_condition(filter);
        let total = self.count_products(filter).await?;

        let models = retry::with_retry("list_products", self.retry_config, || async {
            product::Entity::find()
                .filter(condition.clone())
                .order_by_desc(product::Column::UpdatedAt)
                .order_by_asc(product::Column::Id)
                .paginate(db, page_size.max(1))
                .fetch_page(page.saturating_sub(1))
                .await
        })
        .await?;

        Ok(Page {
            items: models.into_iter().map(model_to_product).collect(),
            total,
        })
    }

    pub async fn insert_product(&self, p: &Product) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_product", self.retry_config, || async {
            product::Entity::insert(product_to_active_model(p, true))
                .exec_without_returning(db)
                .await
        })
        .await?;
        self.invalidate_count_cache();
        info!("Product created: {} ({})", p.slug, p.id);
        Ok(())
    }

    pub async fn update_product(&self, p: &Product) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("update_product", self.retry_config, || async {
            product::Entity::update_many()
                .set(product_to_active_model(p, false))
                .filter(product::Column::Id.eq(p.id.as_str()))
                .exec(db)
                .await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!(
                "Product '{}' not found",
                p.id
            )));
        }
        self.invalidate_count_cache();
        info!("Product updated: {} ({})", p.slug, p.id);
        Ok(())
    }

    pub async fn delete_product(&self, id: &str) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("delete_product", self.retry_config, || async {
            product::Entity::delete_by_id(id).exec(db).await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!("Product '{}' not found", id)));
        }
        self.invalidate_count_cache();
        info!("Product deleted: {}", id);
        Ok(())
    }

    pub async fn count_products(&self, filter: &ProductFilter) -> Result<u64> {
        let db = &self.db;
        let condition = product_condition(filter);
        let key = format!(
            "products:p={}:c={:?}:s={:?}",
            filter.published_only, filter.category, filter.search
        );
        self.cached_count(key, || async {
            product::Entity::find()
                .filter(condition.clone())
                .count(db)
                .await
        })
        .await
    }
}
