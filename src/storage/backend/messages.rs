use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use sea_orm::sea_query::Expr;
use tracing::info;

use super::converters::{message_to_active_model, model_to_message};
use super::{Page, SeaOrmStorage, retry};
use crate::errors::{HandlineError, Result};
use crate::storage::models::{Message, MessageFilter};

use migration::entities::message;

fn message_condition(filter: &MessageFilter) -> Condition {
    let mut condition = Condition::all();
    if filter.unread_only {
        condition = condition.add(message::Column::IsRead.eq(false));
    }
    condition
}

impl SeaOrmStorage {
    pub async fn get_message(&self, id: &str) -> Result<Option<Message>> {
        let db = &self.db;
        let model = retry::with_retry("get_message", self.retry_config, || async {
            message::Entity::find_by_id(id).one(db).await
        })
        .await?;
        Ok(model.map(model_to_message))
    }

    /// 最新的在前
    pub async fn list_messages(
        &self,
        filter: &MessageFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Message>> {
        let db = &self.db;
        let condition = message_condition(filter);
        let total = self.count_messages(filter).await?;

        let models = retry::with_retry("list_messages", self.retry_config, || async {
            message::Entity::find()
                .filter(condition.clone())
                .order_by_desc(message::Column::CreatedAt)
                .order_by_asc(message::Column::Id)
                .paginate(db, page_size.max(1))
                .fetch_page(page.saturating_sub(1))
                .await
        })
        .await?;

        Ok(Page {
            items: models.into_iter().map(model_to_message).collect(),
            total,
        })
    }

    pub async fn insert_message(&self, m: &Message) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_message", self.retry_config, || async {
            message::Entity::insert(message_to_active_model(m))
                .exec_without_returning(db)
                .await
        })
        .await?;
        self.invalidate_count_cache();
        info!("Message received: {} from {}", m.id, m.email);
        Ok(())
    }

    pub async fn set_message_read(&self, id: &str, read: bool) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("set_message_read", self.retry_config, || async {
            message::Entity::update_many()
                .col_expr(message::Column::IsRead, Expr::value(read))
                .filter(message::Column::Id.eq(id))
                .exec(db)
                .await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!("Message '{}' not found", id)));
        }
        self.invalidate_count_cache();
        Ok(())
    }

    pub async fn delete_message(&self, id: &str) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("delete_message", self.retry_config, || async {
            message::Entity::delete_by_id(id).exec(db).await
        })
        .await?;
        if result.rows_affected == 0 {
            return Err(HandlineError::not_found(format!("Message '{}' not found", id)));
        }
        self.invalidate_count_cache();
        info!("Message deleted: {}", id);
        Ok(())
    }

    pub async fn count_messages(&self, filter: &MessageFilter) -> Result<u64> {
        let db = &self.db;
        let condition = message_condition(filter);
        let key = format!("messages:u={}", filter.unread_only);
        self.cached_count(key, || async {
            message::Entity::find()
                .filter(condition.clone())
                .count(db)
                .await
        })
        .await
    }
}
