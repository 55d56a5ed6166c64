use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::info;

use super::converters::{model_to_post, post_to_active_model};
use super::{Page, SeaOrmStorage, retry};
use crate::errors::{HandlineError, Result};
use crate::storage::models::{Post, PostFilter, PostKind};

use migration::entities::post;

fn post_condition(filter: &PostFilter) -> Condition {
    let mut condition = Condition::all().add(post::Column::Kind.eq(filter.kind.to_string()));
    if filter.published_only {
        condition = condition.add(post::Column::Published.eq(true));
    }
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(post::Column::Title.contains(search))
                .add(post::Column::Slug.contains(search)),
        );
    }
    condition
}

impl SeaOrmStorage {
    /// id 必须属于该 kind，否则视为不存在
    pub async fn get_post(&self, kind: PostKind, id: &str) -> Result<Option<Post>> {
        let db = &self.db;
        let model = retry::with_retry("get_post", self.retry_config, || async {
            post::Entity::find_by_id(id)
                .filter(post::Column::Kind.eq(kind.to_string()))
                .one(db)
                .await
        })
        .await?;
        Ok(model.map(model_to_post))
    }

    pub async fn get_post_by_slug(&self, kind: PostKind, slug: &str) -> Result<Option<Post>> {
        let db = &self.db;
        let model = retry::with_retry("get_post_by_slug", self.retry_config, || async {
            post::Entity::find()
                .filter(post::Column::Kind.eq(kind.to_string()))
                .filter(post::Column::Slug.eq(slug))
                .one(db)
                .await
        })
        .await?;
        Ok(model.map(model_to_post))
    }

    /// 最新发布的在前；未发布的草稿按创建时间
    pub async fn list_posts(
        &self,
        filter: &PostFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Post>> {
        let db = &self.db;
        let condition = post_condition(filter);
        let total = self.count_posts(filter).await?;

        let models = retry::with_retry("list_posts", self.retry_config, || async {
            post::Entity::find()
                .filter(condition.clone())
                .order_by_desc(post::Column::PublishedAt)
                .order_by_desc(post::Column::CreatedAt)
                .paginate(db, page_size.max(1))
                .fetch_page(page.saturating_sub(1))
                .await
        })
        .await?;

        Ok(Page {
            items: models.into_iter().map(model_to_post).collect(),
            total,
        })
    }

    /// 不分页加载（搜索用）；`limit` 为 None 时取全部
    pub async fn load_posts(&self, filter: &PostFilter, limit: Option<u64>) -> Result<Vec<Post>> {
        let db = &self.db;
        let condition = post_condition(filter);
        let models = retry::with_retry("load_posts", self.retry_config, || async {
            post::Entity::find()
                .filter(condition.clone())
                .order_by_desc(post::Column::PublishedAt)
                .order_by_desc(post::Column::CreatedAt)
                .limit(limit)
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_post).collect())
    }

    pub async fn insert_post(&self, p: &Post) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_post", self.retry_config, || async {
            post::Entity::insert(post_to_active_model(p, true))
                .exec_without_returning(db)
                .await
        })
        .await?;
        self.invalidate_count_cache();
        info!("{} created: {}", p.kind.label(), p.slug);
        Ok(())
    }

    pub async fn update_post(&self, p: &Post) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("update_post", self.retry_config, || async {
            post::Entity::update_many()
                .set(post_to_active_model(p, false))
                .filter(post::Column::Id.eq(p.id.as_str()))
                .filter(post::Column::Kind.eq(p.kind.to_string()))
                .exec(db)
                .await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!(
                "{} '{}' not found",
                p.kind.label(),
                p.id
            )));
        }
        self.invalidate_count_cache();
        info!("{} updated: {}", p.kind.label(), p.slug);
        Ok(())
    }

    pub async fn delete_post(&self, kind: PostKind, id: &str) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("delete_post", self.retry_config, || async {
            post::Entity::delete_many()
                .filter(post::Column::Id.eq(id))
                .filter(post::Column::Kind.eq(kind.to_string()))
                .exec(db)
                .await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!(
                "{} '{}' not found",
                kind.label(),
                id
            )));
        }
        self.invalidate_count_cache();
        info!("{} deleted: {}", kind.label(), id);
        Ok(())
    }

    pub async fn count_posts(&self, filter: &PostFilter) -> Result<u64> {
        let db = &self.db;
        let condition = post_condition(filter);
        let key = format!(
            "posts:k={}:p={}:s={:?}",
            filter.kind, filter.published_only, filter.search
        );
        self.cached_count(key, || async {
            post::Entity::find()
                .filter(condition.clone())
                .count(db)
                .await
        })
        .await
    }
}
