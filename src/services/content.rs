//! Editorial content: blog posts, case studies, careers, brands and the PPE hub

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{non_blank, require, resolve_slug};
use crate::api::services::admin::TS_EXPORT_PATH;
use crate::content::{
    Locale, LocaleDraft, LocalizedList, LocalizedText, localized, localized_list,
};
use crate::errors::{HandlineError, Result};
use crate::storage::{
    Brand, ContentStats, Page, Post, PostDetails, PostFilter, PostKind, PpeCategory, PpeSection, SeaOrmStorage,
};

// ============ Public views ============

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PostView {
    pub id: String,
    pub kind: PostKind,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub body: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[ts(type = "string | null")]
    pub published_at: Option<DateTime<Utc>>,
}

impl PostView {
    pub fn localize(p: &Post, locale: Locale) -> Self {
        Self {
            id: p.id.clone(),
            kind: p.kind,
            slug: p.slug.clone(),
            title: localized(p.title_locales.as_ref(), locale, &p.title),
            summary: localized(p.summary_locales.as_ref(), locale, &p.summary),
            body: localized(p.body_locales.as_ref(), locale, &p.body),
            image_url: p.image_url.clone(),
            tags: localized_list(p.tags.as_ref(), locale),
            author: p.details.author.clone(),
            client: p.details.client.clone(),
            industry: p.details.industry.clone(),
            department: p.details.department.clone(),
            location: p.details.location.clone(),
            employment_type: p.details.employment_type.clone(),
            requirements: localized_list(p.details.requirements.as_ref(), locale),
            published_at: p.published_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct BrandView {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
}

impl BrandView {
    pub fn localize(b: &Brand, locale: Locale) -> Self {
        Self {
            slug: b.slug.clone(),
            name: b.name.clone(),
            description: localized(b.description_locales.as_ref(), locale, &b.description),
            logo_url: b.logo_url.clone(),
            website: b.website.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PpeSectionView {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// `sections` is empty in the category list and filled on the detail page
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct PpeCategoryView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub sections: Vec<PpeSectionView>,
}

impl PpeCategoryView {
    pub fn localize(c: &PpeCategory, sections: &[PpeSection], locale: Locale) -> Self {
        Self {
            slug: c.slug.clone(),
            title: localized(c.title_locales.as_ref(), locale, &c.title),
            description: localized(c.description_locales.as_ref(), locale, &c.description),
            image_url: c.image_url.clone(),
            sections: sections
                .iter()
                .map(|s| PpeSectionView {
                    id: s.id.clone(),
                    title: localized(s.title_locales.as_ref(), locale, &s.title),
                    body: localized(s.body_locales.as_ref(), locale, &s.body),
                })
                .collect(),
        }
    }
}

/// Admin view of a PPE category with its sections
#[derive(Debug, Clone, Serialize)]
pub struct PpeCategoryDetail {
    #[serde(flatten)]
    pub category: PpeCategory,
    pub sections: Vec<PpeSection>,
}

// ============ Admin editor payloads ============

/// Shared editor payload for all three post kinds. Fields that do not apply
/// to the kind being saved are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct PostInput {
    pub active_locale: Locale,
    pub slug: Option<String>,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    pub body: LocalizedText,
    pub image_url: Option<String>,
    pub tags: LocalizedList,
    // blog
    pub author: Option<String>,
    // case study
    pub client: Option<String>,
    pub industry: Option<String>,
    // career
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub requirements: LocalizedList,
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct BrandInput {
    pub active_locale: Locale,
    pub slug: Option<String>,
    pub name: String,
    pub description: LocalizedText,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct PpeCategoryInput {
    pub active_locale: Locale,
    pub slug: Option<String>,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image_url: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct PpeSectionInput {
    pub active_locale: Locale,
    pub title: LocalizedText,
    pub body: LocalizedText,
    pub sort_order: i32,
}

fn english_or(title: &LocalizedText, fallback: &str) -> String {
    if title.en.trim().is_empty() {
        fallback.to_string()
    } else {
        title.en.clone()
    }
}

fn post_details(kind: PostKind, input: &mut PostInput) -> PostDetails {
    let mut details = PostDetails::default();
    match kind {
        PostKind::Blog => {
            details.author = non_blank(input.author.take());
        }
        PostKind::CaseStudy => {
            details.client = non_blank(input.client.take());
            details.industry = non_blank(input.industry.take());
        }
        PostKind::Career => {
            details.department = non_blank(input.department.take());
            details.location = non_blank(input.location.take());
            details.employment_type = non_blank(input.employment_type.take());
            let (_, requirements) =
                LocaleDraft::from_list(input.active_locale, std::mem::take(&mut input.requirements))
                    .submit();
            details.requirements = requirements;
        }
    }
    details
}

/// 写入 post；第一次发布时记录 published_at，取消发布时清空
fn apply_post_input(post: &mut Post, mut input: PostInput, existing_slug: Option<&str>) -> Result<()> {
    let active = input.active_locale;
    let details = post_details(post.kind, &mut input);

    let (title, title_locales) = LocaleDraft::from_text(active, input.title.clone()).submit();
    let (summary, summary_locales) = LocaleDraft::from_text(active, input.summary).submit();
    let (body, body_locales) = LocaleDraft::from_text(active, input.body).submit();
    let (_, tags) = LocaleDraft::from_list(active, input.tags).submit();

    require(&title, "Title")?;
    post.slug = resolve_slug(
        existing_slug,
        input.slug.as_deref(),
        &english_or(&input.title, &title),
    )?;

    post.published_at = match (input.published, post.published_at) {
        (true, Some(at)) => Some(at),
        (true, None) => Some(Utc::now()),
        (false, _) => None,
    };
    post.title = title.trim().to_string();
    post.title_locales = title_locales;
    post.summary = summary;
    post.summary_locales = summary_locales;
    post.body = body;
    post.body_locales = body_locales;
    post.image_url = non_blank(input.image_url);
    post.tags = tags;
    post.details = details;
    post.published = input.published;
    Ok(())
}

fn apply_brand_input(brand: &mut Brand, input: BrandInput, existing_slug: Option<&str>) -> Result<()> {
    require(&input.name, "Brand name")?;
    let (description, description_locales) =
        LocaleDraft::from_text(input.active_locale, input.description).submit();

    brand.slug = resolve_slug(existing_slug, input.slug.as_deref(), &input.name)?;
    brand.name = input.name.trim().to_string();
    brand.description = description;
    brand.description_locales = description_locales;
    brand.logo_url = non_blank(input.logo_url);
    brand.website = non_blank(input.website);
    brand.sort_order = input.sort_order;
    Ok(())
}

fn apply_category_input(
    category: &mut PpeCategory,
    input: PpeCategoryInput,
    existing_slug: Option<&str>,
) -> Result<()> {
    let active = input.active_locale;
    let (title, title_locales) = LocaleDraft::from_text(active, input.title.clone()).submit();
    let (description, description_locales) =
        LocaleDraft::from_text(active, input.description).submit();
    require(&title, "Title")?;

    category.slug = resolve_slug(
        existing_slug,
        input.slug.as_deref(),
        &english_or(&input.title, &title),
    )?;
    category.title = title.trim().to_string();
    category.title_locales = title_locales;
    category.description = description;
    category.description_locales = description_locales;
    category.image_url = non_blank(input.image_url);
    category.sort_order = input.sort_order;
    Ok(())
}

fn apply_section_input(section: &mut PpeSection, input: PpeSectionInput) -> Result<()> {
    let active = input.active_locale;
    let (title, title_locales) = LocaleDraft::from_text(active, input.title).submit();
    let (body, body_locales) = LocaleDraft::from_text(active, input.body).submit();
    require(&title, "Section title")?;

    section.title = title.trim().to_string();
    section.title_locales = title_locales;
    section.body = body;
    section.body_locales = body_locales;
    section.sort_order = input.sort_order;
    Ok(())
}

// ============ ContentService ============

pub struct ContentService {
    storage: Arc<SeaOrmStorage>,
}

impl ContentService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    // ---------- posts ----------

    pub async fn published_posts(
        &self,
        kind: PostKind,
        locale: Locale,
        page: u64,
        page_size: u64,
    ) -> Result<Page<PostView>> {
        let filter = PostFilter {
            published_only: true,
            ..PostFilter::new(kind)
        };
        let page = self.storage.list_posts(&filter, page, page_size).await?;
        Ok(Page {
            items: page
                .items
                .iter()
                .map(|p| PostView::localize(p, locale))
                .collect(),
            total: page.total,
        })
    }

    pub async fn published_post(&self, kind: PostKind, slug: &str, locale: Locale) -> Result<PostView> {
        match self.storage.get_post_by_slug(kind, slug).await? {
            Some(p) if p.published => Ok(PostView::localize(&p, locale)),
            _ => Err(HandlineError::not_found(format!(
                "{} '{}' not found",
                kind.label(),
                slug
            ))),
        }
    }

    pub async fn list_posts(&self, filter: &PostFilter, page: u64, page_size: u64) -> Result<Page<Post>> {
        self.storage.list_posts(filter, page, page_size).await
    }

    pub async fn get_post(&self, kind: PostKind, id: &str) -> Result<Post> {
        self.storage.get_post(kind, id).await?.ok_or_else(|| {
            HandlineError::not_found(format!("{} '{}' not found", kind.label(), id))
        })
    }

    pub async fn create_post(&self, kind: PostKind, input: PostInput) -> Result<Post> {
        let now = Utc::now();
        let mut post = Post {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            slug: String::new(),
            title: String::new(),
            title_locales: None,
            summary: String::new(),
            summary_locales: None,
            body: String::new(),
            body_locales: None,
            image_url: None,
            tags: None,
            details: PostDetails::default(),
            published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        apply_post_input(&mut post, input, None)?;
        self.ensure_post_slug_free(kind, &post.slug, None).await?;
        self.storage.insert_post(&post).await?;
        Ok(post)
    }

    pub async fn update_post(&self, kind: PostKind, id: &str, input: PostInput) -> Result<Post> {
        let mut post = self.get_post(kind, id).await?;
        let existing_slug = post.slug.clone();
        apply_post_input(&mut post, input, Some(&existing_slug))?;
        post.updated_at = Utc::now();
        if post.slug != existing_slug {
            self.ensure_post_slug_free(kind, &post.slug, Some(id)).await?;
        }
        self.storage.update_post(&post).await?;
        Ok(post)
    }

    pub async fn delete_post(&self, kind: PostKind, id: &str) -> Result<()> {
        self.storage.delete_post(kind, id).await
    }

    /// slug 只在同一类型内唯一
    async fn ensure_post_slug_free(&self, kind: PostKind, slug: &str, own_id: Option<&str>) -> Result<()> {
        if let Some(other) = self.storage.get_post_by_slug(kind, slug).await?
            && own_id != Some(other.id.as_str())
        {
            return Err(HandlineError::conflict(format!(
                "{} slug '{}' is already used",
                kind.label(),
                slug
            )));
        }
        Ok(())
    }

    // ---------- brands ----------

    pub async fn brands(&self, locale: Locale) -> Result<Vec<BrandView>> {
        Ok(self
            .storage
            .load_brands()
            .await?
            .iter()
            .map(|b| BrandView::localize(b, locale))
            .collect())
    }

    pub async fn all_brands(&self) -> Result<Vec<Brand>> {
        self.storage.load_brands().await
    }

    pub async fn get_brand(&self, id: &str) -> Result<Brand> {
        self.storage
            .get_brand(id)
            .await?
            .ok_or_else(|| HandlineError::not_found(format!("Brand '{}' not found", id)))
    }

    pub async fn create_brand(&self, input: BrandInput) -> Result<Brand> {
        let now = Utc::now();
        let mut brand = Brand {
            id: uuid::Uuid::new_v4().to_string(),
            slug: String::new(),
            name: String::new(),
            description: String::new(),
            description_locales: None,
            logo_url: None,
            website: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        apply_brand_input(&mut brand, input, None)?;
        self.ensure_brand_slug_free(&brand.slug, None).await?;
        self.storage.insert_brand(&brand).await?;
        Ok(brand)
    }

    pub async fn update_brand(&self, id: &str, input: BrandInput) -> Result<Brand> {
        let mut brand = self.get_brand(id).await?;
        let existing_slug = brand.slug.clone();
        apply_brand_input(&mut brand, input, Some(&existing_slug))?;
        brand.updated_at = Utc::now();
        if brand.slug != existing_slug {
            self.ensure_brand_slug_free(&brand.slug, Some(id)).await?;
        }
        self.storage.update_brand(&brand).await?;
        Ok(brand)
    }

    pub async fn delete_brand(&self, id: &str) -> Result<()> {
        self.storage.delete_brand(id).await
    }

    async fn ensure_brand_slug_free(&self, slug: &str, own_id: Option<&str>) -> Result<()> {
        if let Some(other) = self.storage.get_brand_by_slug(slug).await?
            && own_id != Some(other.id.as_str())
        {
            return Err(HandlineError::conflict(format!(
                "Brand slug '{}' is already used",
                slug
            )));
        }
        Ok(())
    }

    // ---------- PPE hub ----------

    pub async fn ppe_categories(&self, locale: Locale) -> Result<Vec<PpeCategoryView>> {
        Ok(self
            .storage
            .load_ppe_categories()
            .await?
            .iter()
            .map(|c| PpeCategoryView::localize(c, &[], locale))
            .collect())
    }

    pub async fn ppe_category(&self, slug: &str, locale: Locale) -> Result<PpeCategoryView> {
        let category = self
            .storage
            .get_ppe_category_by_slug(slug)
            .await?
            .ok_or_else(|| HandlineError::not_found(format!("PPE category '{}' not found", slug)))?;
        let sections = self.storage.load_ppe_sections(&category.id).await?;
        Ok(PpeCategoryView::localize(&category, &sections, locale))
    }

    pub async fn all_ppe_categories(&self) -> Result<Vec<PpeCategory>> {
        self.storage.load_ppe_categories().await
    }

    pub async fn get_ppe_category(&self, id: &str) -> Result<PpeCategoryDetail> {
        let category = self.find_ppe_category(id).await?;
        let sections = self.storage.load_ppe_sections(&category.id).await?;
        Ok(PpeCategoryDetail { category, sections })
    }

    async fn find_ppe_category(&self, id: &str) -> Result<PpeCategory> {
        self.storage
            .get_ppe_category(id)
            .await?
            .ok_or_else(|| HandlineError::not_found(format!("PPE category '{}' not found", id)))
    }

    pub async fn create_ppe_category(&self, input: PpeCategoryInput) -> Result<PpeCategory> {
        let now = Utc::now();
        let mut category = PpeCategory {
            id: uuid::Uuid::new_v4().to_string(),
            slug: String::new(),
            title: String::new(),
            title_locales: None,
            description: String::new(),
            description_locales: None,
            image_url: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        apply_category_input(&mut category, input, None)?;
        self.ensure_category_slug_free(&category.slug, None).await?;
        self.storage.insert_ppe_category(&category).await?;
        Ok(category)
    }

    pub async fn update_ppe_category(&self, id: &str, input: PpeCategoryInput) -> Result<PpeCategory> {
        let mut category = self.find_ppe_category(id).await?;
        let existing_slug = category.slug.clone();
        apply_category_input(&mut category, input, Some(&existing_slug))?;
        category.updated_at = Utc::now();
        if category.slug != existing_slug {
            self.ensure_category_slug_free(&category.slug, Some(id)).await?;
        }
        self.storage.update_ppe_category(&category).await?;
        Ok(category)
    }

    pub async fn delete_ppe_category(&self, id: &str) -> Result<()> {
        self.storage.delete_ppe_category(id).await
    }

    async fn ensure_category_slug_free(&self, slug: &str, own_id: Option<&str>) -> Result<()> {
        if let Some(other) = self.storage.get_ppe_category_by_slug(slug).await?
            && own_id != Some(other.id.as_str())
        {
            return Err(HandlineError::conflict(format!(
                "PPE category slug '{}' is already used",
                slug
            )));
        }
        Ok(())
    }

    pub async fn create_ppe_section(&self, category_id: &str, input: PpeSectionInput) -> Result<PpeSection> {
        // 分类必须存在
        self.find_ppe_category(category_id).await?;

        let now = Utc::now();
        let mut section = PpeSection {
            id: uuid::Uuid::new_v4().to_string(),
            category_id: category_id.to_string(),
            title: String::new(),
            title_locales: None,
            body: String::new(),
            body_locales: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        apply_section_input(&mut section, input)?;
        self.storage.insert_ppe_section(&section).await?;
        Ok(section)
    }

    pub async fn update_ppe_section(&self, id: &str, input: PpeSectionInput) -> Result<PpeSection> {
        let mut section = self
            .storage
            .get_ppe_section(id)
            .await?
            .ok_or_else(|| HandlineError::not_found(format!("PPE section '{}' not found", id)))?;
        apply_section_input(&mut section, input)?;
        section.updated_at = Utc::now();
        self.storage.update_ppe_section(&section).await?;
        Ok(section)
    }

    pub async fn delete_ppe_section(&self, id: &str) -> Result<()> {
        self.storage.delete_ppe_section(id).await
    }

    /// 后台首页计数
    pub async fn stats(&self) -> Result<ContentStats> {
        self.storage.content_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_post(kind: PostKind) -> Post {
        let now = Utc::now();
        Post {
            id: "x".into(),
            kind,
            slug: String::new(),
            title: String::new(),
            title_locales: None,
            summary: String::new(),
            summary_locales: None,
            body: String::new(),
            body_locales: None,
            image_url: None,
            tags: None,
            details: PostDetails::default(),
            published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_post_details_keep_only_kind_fields() {
        let mut post = empty_post(PostKind::Career);
        let input = PostInput {
            title: LocalizedText::new("Warehouse Operator", ""),
            author: Some("Giulia".into()),
            department: Some("Logistics".into()),
            requirements: LocalizedList {
                en: vec!["Forklift licence".into()],
                it: vec![],
            },
            ..Default::default()
        };
        apply_post_input(&mut post, input, None).unwrap();

        assert_eq!(post.slug, "warehouse-operator");
        assert_eq!(post.details.department.as_deref(), Some("Logistics"));
        assert!(post.details.author.is_none());
        assert_eq!(post.details.requirements.unwrap().en, vec!["Forklift licence"]);
    }

    #[test]
    fn test_published_at_tracks_publication() {
        let mut post = empty_post(PostKind::Blog);
        let mut input = PostInput {
            title: LocalizedText::new("News", "Notizie"),
            published: true,
            ..Default::default()
        };
        apply_post_input(&mut post, input.clone(), None).unwrap();
        let first = post.published_at.expect("published_at set on publish");

        apply_post_input(&mut post, input.clone(), Some("news")).unwrap();
        assert_eq!(post.published_at, Some(first));

        input.published = false;
        apply_post_input(&mut post, input, Some("news")).unwrap();
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_post_view_resolves_locale_with_fallback() {
        let mut post = empty_post(PostKind::CaseStudy);
        post.title = "Legacy title".into();
        post.title_locales = Some(LocalizedText::new("English title", ""));
        post.tags = Some(LocalizedList {
            en: vec!["ports".into()],
            it: vec![],
        });

        let it = PostView::localize(&post, Locale::It);
        assert_eq!(it.title, "Legacy title");
        assert_eq!(it.tags, vec!["ports"]);

        let en = PostView::localize(&post, Locale::En);
        assert_eq!(en.title, "English title");
    }

    #[test]
    fn test_brand_slug_from_name() {
        let now = Utc::now();
        let mut brand = Brand {
            id: "b".into(),
            slug: String::new(),
            name: String::new(),
            description: String::new(),
            description_locales: None,
            logo_url: None,
            website: Some("  ".into()),
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        let input = BrandInput {
            name: "Ansell Healthcare".into(),
            ..Default::default()
        };
        apply_brand_input(&mut brand, input, None).unwrap();
        assert_eq!(brand.slug, "ansell-healthcare");
        assert!(brand.website.is_none());
    }

    #[test]
    fn test_category_title_required() {
        let now = Utc::now();
        let mut category = PpeCategory {
            id: "c".into(),
            slug: String::new(),
            title: String::new(),
            title_locales: None,
            description: String::new(),
            description_locales: None,
            image_url: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        };
        assert!(apply_category_input(&mut category, PpeCategoryInput::default(), None).is_err());
    }
}
