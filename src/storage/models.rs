use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;
use crate::content::{LocalizedList, LocalizedText};

// ============ Product attribute bags ============

/// EN 388 mechanical risks. Ratings are kept as the printed marking
/// (`"4"`, `"X"`, `"F"`), never as numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct En388Rating {
    pub abrasion: Option<String>,
    pub cut: Option<String>,
    pub tear: Option<String>,
    pub puncture: Option<String>,
    pub cut_iso: Option<String>,
    pub impact: Option<String>,
}

/// EN 407 thermal risks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct En407Rating {
    pub burning: Option<String>,
    pub contact_heat: Option<String>,
    pub convective_heat: Option<String>,
    pub radiant_heat: Option<String>,
    pub small_splashes: Option<String>,
    pub large_splashes: Option<String>,
}

/// EN 511 cold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct En511Rating {
    pub convective_cold: Option<String>,
    pub contact_cold: Option<String>,
    pub water: Option<String>,
}

/// EN ISO 374 chemicals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct En374Rating {
    /// Type A / B / C
    pub glove_type: Option<String>,
    /// Test chemical letter codes
    pub chemicals: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct SafetyRatings {
    pub en388: Option<En388Rating>,
    pub en407: Option<En407Rating>,
    pub en511: Option<En511Rating>,
    pub en374: Option<En374Rating>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct ClothingAttributes {
    pub garment_type: Option<String>,
    pub protection_class: Option<String>,
}

/// Boolean product features shown as filter checkboxes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    TS,
    EnumIter,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProductFlag {
    Touchscreen,
    Waterproof,
    HighVisibility,
    FlameRetardant,
    Antistatic,
    FoodSafe,
}

impl ProductFlag {
    pub fn all_names() -> Vec<&'static str> {
        Self::iter().map(|f| f.into()).collect()
    }
}

impl std::fmt::Display for ProductFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

// ============ Entities ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub name_locales: Option<LocalizedText>,
    pub description: String,
    pub description_locales: Option<LocalizedText>,
    pub category: String,
    pub sub_category: Option<String>,
    pub brand_slug: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub en_standards: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub work_environments: Vec<String>,
    pub features: Option<LocalizedList>,
    #[serde(default)]
    pub safety: SafetyRatings,
    #[serde(default)]
    pub clothing: ClothingAttributes,
    #[serde(default)]
    pub flags: Vec<ProductFlag>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub description_locales: Option<LocalizedText>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content type stored in the shared `posts` table
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TS,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PostKind {
    Blog,
    CaseStudy,
    Career,
}

impl PostKind {
    /// URL segment used by the public and admin routes
    pub fn route_segment(&self) -> &'static str {
        match self {
            PostKind::Blog => "blog",
            PostKind::CaseStudy => "case-studies",
            PostKind::Career => "careers",
        }
    }

    pub fn from_route_segment(segment: &str) -> Option<Self> {
        PostKind::iter().find(|k| k.route_segment() == segment)
    }

    /// Human label used in log lines and error messages
    pub fn label(&self) -> &'static str {
        match self {
            PostKind::Blog => "Blog post",
            PostKind::CaseStudy => "Case study",
            PostKind::Career => "Career",
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Kind-specific fields, serialized into the `details` column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct PostDetails {
    // blog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    // case study
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    // career
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<LocalizedList>,
}

impl PostDetails {
    pub fn is_empty(&self) -> bool {
        *self == PostDetails::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub kind: PostKind,
    pub slug: String,
    pub title: String,
    pub title_locales: Option<LocalizedText>,
    pub summary: String,
    pub summary_locales: Option<LocalizedText>,
    pub body: String,
    pub body_locales: Option<LocalizedText>,
    pub image_url: Option<String>,
    pub tags: Option<LocalizedList>,
    #[serde(default)]
    pub details: PostDetails,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpeCategory {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub title_locales: Option<LocalizedText>,
    pub description: String,
    pub description_locales: Option<LocalizedText>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpeSection {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub title_locales: Option<LocalizedText>,
    pub body: String,
    pub body_locales: Option<LocalizedText>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact-form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// ============ Query filters ============

#[derive(Default, Clone, Debug)]
pub struct ProductFilter {
    pub published_only: bool,
    pub category: Option<String>,
    /// 模糊搜索 name 或 slug
    pub search: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PostFilter {
    pub kind: PostKind,
    pub published_only: bool,
    pub search: Option<String>,
}

impl PostFilter {
    pub fn new(kind: PostKind) -> Self {
        Self {
            kind,
            published_only: false,
            search: None,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct MessageFilter {
    pub unread_only: bool,
}

/// Row counts for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ContentStats {
    pub products: u64,
    pub published_products: u64,
    pub brands: u64,
    pub blog_posts: u64,
    pub case_studies: u64,
    pub careers: u64,
    pub ppe_categories: u64,
    pub messages: u64,
    pub unread_messages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
