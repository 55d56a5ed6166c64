use actix_web::{Responder, Result as ActixResult, web};
use tracing::debug;

use super::catalog::locale_of;
use crate::api::services::admin::{ErrorScope, SearchQuery, api_result};
use crate::services::SearchService;

/// `GET /search/all?q=&locale=&limit=`
pub async fn search_all(
    query: web::Query<SearchQuery>,
    search: web::Data<SearchService>,
) -> ActixResult<impl Responder> {
    let q = query.q.as_deref().unwrap_or_default();
    debug!("Public API: search '{}'", q);
    Ok(api_result(
        ErrorScope::GENERAL,
        search
            .search_all(q, locale_of(query.locale.as_deref()), query.limit)
            .await,
    ))
}
