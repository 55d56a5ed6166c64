use sea_orm::entity::prelude::*;

/// Catalogue product. JSON columns hold serialized attribute bags and
/// `{en, it}` locale payloads next to the legacy single-language columns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub name_locales: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description_locales: Option<String>,
    pub category: String,
    pub sub_category: Option<String>,
    pub brand_slug: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub gallery: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub en_standards: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub sizes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub work_environments: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub features_locales: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub safety: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub clothing: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub flags: Option<String>,
    pub published: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
