//! Catalogue service
//!
//! Public browsing (facets + locale resolution) and admin product editing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use super::{clean_list, non_blank, require, resolve_slug};
use crate::api::services::admin::TS_EXPORT_PATH;
use crate::catalog::{FacetCounts, ProductFacets};
use crate::content::{
    Locale, LocaleDraft, LocalizedList, LocalizedText, localized, localized_list,
};
use crate::errors::{HandlineError, Result};
use crate::storage::models::{ClothingAttributes, SafetyRatings};
use crate::storage::{Page, Product, ProductFilter, ProductFlag, SeaOrmStorage};

// ============ DTOs ============

/// Product as the website renders it: every translatable field resolved
/// for one locale.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct ProductView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub sub_category: Option<String>,
    pub brand_slug: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub en_standards: Vec<String>,
    pub sizes: Vec<String>,
    pub work_environments: Vec<String>,
    pub features: Vec<String>,
    pub safety: SafetyRatings,
    pub clothing: ClothingAttributes,
    pub flags: Vec<ProductFlag>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl ProductView {
    pub fn localize(p: &Product, locale: Locale) -> Self {
        Self {
            id: p.id.clone(),
            slug: p.slug.clone(),
            name: localized(p.name_locales.as_ref(), locale, &p.name),
            description: localized(p.description_locales.as_ref(), locale, &p.description),
            category: p.category.clone(),
            sub_category: p.sub_category.clone(),
            brand_slug: p.brand_slug.clone(),
            image_url: p.image_url.clone(),
            gallery: p.gallery.clone(),
            en_standards: p.en_standards.clone(),
            sizes: p.sizes.clone(),
            work_environments: p.work_environments.clone(),
            features: localized_list(p.features.as_ref(), locale),
            safety: p.safety.clone(),
            clothing: p.clothing.clone(),
            flags: p.flags.clone(),
            updated_at: p.updated_at,
        }
    }
}

/// Admin product editor payload
///
/// Translatable fields carry both languages; `active_locale` is the language
/// the editor was showing, mirrored into the legacy columns on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(default)]
pub struct ProductInput {
    pub active_locale: Locale,
    /// Explicit slug; derived from the English name when absent
    pub slug: Option<String>,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: String,
    pub sub_category: Option<String>,
    pub brand_slug: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub en_standards: Vec<String>,
    pub sizes: Vec<String>,
    pub work_environments: Vec<String>,
    pub features: LocalizedList,
    pub safety: SafetyRatings,
    pub clothing: ClothingAttributes,
    pub flags: Vec<ProductFlag>,
    pub published: bool,
}

/// One CSV export row
#[derive(Debug, Serialize)]
struct ProductCsvRow<'a> {
    id: &'a str,
    slug: &'a str,
    name: &'a str,
    name_it: &'a str,
    category: &'a str,
    sub_category: &'a str,
    brand: &'a str,
    en_standards: String,
    sizes: String,
    work_environments: String,
    garment_type: &'a str,
    protection_class: &'a str,
    flags: String,
    published: bool,
    updated_at: String,
}

impl<'a> From<&'a Product> for ProductCsvRow<'a> {
    fn from(p: &'a Product) -> Self {
        let flags: Vec<&str> = p.flags.iter().map(|f| f.as_ref()).collect();
        Self {
            id: &p.id,
            slug: &p.slug,
            name: &p.name,
            name_it: p.name_locales.as_ref().map_or("", |l| l.it.as_str()),
            category: &p.category,
            sub_category: p.sub_category.as_deref().unwrap_or_default(),
            brand: p.brand_slug.as_deref().unwrap_or_default(),
            en_standards: p.en_standards.join("|"),
            sizes: p.sizes.join("|"),
            work_environments: p.work_environments.join("|"),
            garment_type: p.clothing.garment_type.as_deref().unwrap_or_default(),
            protection_class: p.clothing.protection_class.as_deref().unwrap_or_default(),
            flags: flags.join("|"),
            published: p.published,
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

// ============ CatalogService ============

pub struct CatalogService {
    storage: Arc<SeaOrmStorage>,
}

impl CatalogService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    async fn published_products(&self) -> Result<Vec<Product>> {
        self.storage
            .load_products(&ProductFilter {
                published_only: true,
                ..Default::default()
            })
            .await
    }

    /// 已发布产品 + 分面过滤，在内存中分页
    pub async fn browse(
        &self,
        facets: &ProductFacets,
        locale: Locale,
        page: u64,
        page_size: u64,
    ) -> Result<Page<ProductView>> {
        let matching = facets.apply(self.published_products().await?);
        let total = matching.len() as u64;
        let offset = usize::try_from(page.saturating_sub(1).saturating_mul(page_size))
            .unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|p| ProductView::localize(p, locale))
            .collect();
        Ok(Page { items, total })
    }

    pub async fn facet_counts(&self) -> Result<FacetCounts> {
        Ok(FacetCounts::compute(&self.published_products().await?))
    }

    /// 未发布的产品对外视为不存在
    pub async fn product_by_slug(&self, slug: &str, locale: Locale) -> Result<ProductView> {
        match self.storage.get_product_by_slug(slug).await? {
            Some(p) if p.published => Ok(ProductView::localize(&p, locale)),
            _ => Err(HandlineError::not_found(format!(
                "Product '{}' not found",
                slug
            ))),
        }
    }

    // ---------- admin ----------

    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: u64,
        page_size: u64,
    ) -> Result<Page<Product>> {
        self.storage.list_products(filter, page, page_size).await
    }

    pub async fn get(&self, id: &str) -> Result<Product> {
        self.storage
            .get_product(id)
            .await?
            .ok_or_else(|| HandlineError::not_found(format!("Product '{}' not found", id)))
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product> {
        let now = Utc::now();
        let mut product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            slug: String::new(),
            name: String::new(),
            name_locales: None,
            description: String::new(),
            description_locales: None,
            category: String::new(),
            sub_category: None,
            brand_slug: None,
            image_url: None,
            gallery: Vec::new(),
            en_standards: Vec::new(),
            sizes: Vec::new(),
            work_environments: Vec::new(),
            features: None,
            safety: SafetyRatings::default(),
            clothing: ClothingAttributes::default(),
            flags: Vec::new(),
            published: false,
            created_at: now,
            updated_at: now,
        };
        apply_input(&mut product, input, None)?;
        self.ensure_slug_free(&product.slug, None).await?;
        self.storage.insert_product(&product).await?;
        Ok(product)
    }

    pub async fn update(&self, id: &str, input: ProductInput) -> Result<Product> {
        let mut product = self.get(id).await?;
        let existing_slug = product.slug.clone();
        apply_input(&mut product, input, Some(&existing_slug))?;
        product.updated_at = Utc::now();
        if product.slug != existing_slug {
            self.ensure_slug_free(&product.slug, Some(id)).await?;
        }
        self.storage.update_product(&product).await?;
        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.storage.delete_product(id).await
    }

    async fn ensure_slug_free(&self, slug: &str, own_id: Option<&str>) -> Result<()> {
        if let Some(other) = self.storage.get_product_by_slug(slug).await?
            && own_id != Some(other.id.as_str())
        {
            return Err(HandlineError::conflict(format!(
                "Product slug '{}' is already used",
                slug
            )));
        }
        Ok(())
    }

    /// 全部产品（含未发布）导出为 CSV
    pub async fn export_csv(&self) -> Result<Vec<u8>> {
        let products = self.storage.load_products(&ProductFilter::default()).await?;
        let mut writer = csv::Writer::from_writer(Vec::new());
        for p in &products {
            writer.serialize(ProductCsvRow::from(p))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| HandlineError::serialization(e.to_string()))?;
        info!("Exported {} products to CSV", products.len());
        Ok(bytes)
    }
}

/// 把编辑器提交的内容写入产品记录
fn apply_input(
    product: &mut Product,
    input: ProductInput,
    existing_slug: Option<&str>,
) -> Result<()> {
    let active = input.active_locale;
    let en_name = input.name.en.clone();

    let (name, name_locales) = LocaleDraft::from_text(active, input.name).submit();
    let (description, description_locales) =
        LocaleDraft::from_text(active, input.description).submit();
    let (_, features) = LocaleDraft::from_list(active, input.features).submit();

    require(&name, "Product name")?;
    require(&input.category, "Category")?;

    let title_for_slug = if en_name.trim().is_empty() { &name } else { &en_name };
    product.slug = resolve_slug(existing_slug, input.slug.as_deref(), title_for_slug)?;

    let mut flags = input.flags;
    flags.sort();
    flags.dedup();

    product.name = name.trim().to_string();
    product.name_locales = name_locales;
    product.description = description;
    product.description_locales = description_locales;
    product.category = input.category.trim().to_string();
    product.sub_category = non_blank(input.sub_category);
    product.brand_slug = non_blank(input.brand_slug);
    product.image_url = non_blank(input.image_url);
    product.gallery = clean_list(input.gallery);
    product.en_standards = clean_list(input.en_standards);
    product.sizes = clean_list(input.sizes);
    product.work_environments = clean_list(input.work_environments);
    product.features = features;
    product.safety = input.safety;
    product.clothing = input.clothing;
    product.flags = flags;
    product.published = input.published;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_product() -> Product {
        let now = Utc::now();
        Product {
            id: "p1".into(),
            slug: String::new(),
            name: String::new(),
            name_locales: None,
            description: String::new(),
            description_locales: None,
            category: String::new(),
            sub_category: None,
            brand_slug: None,
            image_url: None,
            gallery: vec![],
            en_standards: vec![],
            sizes: vec![],
            work_environments: vec![],
            features: None,
            safety: SafetyRatings::default(),
            clothing: ClothingAttributes::default(),
            flags: vec![],
            published: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn input() -> ProductInput {
        ProductInput {
            active_locale: Locale::It,
            name: LocalizedText::new("Heat-Resistant Glove!!", "Guanto Termico"),
            description: LocalizedText::new("", ""),
            category: "gloves".into(),
            sizes: vec!["9".into(), " ".into(), "9".into(), "10".into()],
            features: LocalizedList {
                en: vec!["Grip".into(), "".into()],
                it: vec![],
            },
            flags: vec![ProductFlag::Waterproof, ProductFlag::Antistatic, ProductFlag::Waterproof],
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_input_derives_slug_and_mirrors_active_locale() {
        let mut p = blank_product();
        apply_input(&mut p, input(), None).unwrap();

        assert_eq!(p.slug, "heat-resistant-glove");
        // legacy column follows the active language
        assert_eq!(p.name, "Guanto Termico");
        assert_eq!(p.name_locales.as_ref().unwrap().en, "Heat-Resistant Glove!!");
        // both languages blank: no payload
        assert!(p.description_locales.is_none());
        assert_eq!(p.sizes, vec!["9", "10"]);
        assert_eq!(p.features.as_ref().unwrap().en, vec!["Grip"]);
        assert_eq!(p.flags, vec![ProductFlag::Antistatic, ProductFlag::Waterproof]);
    }

    #[test]
    fn test_apply_input_keeps_existing_slug_on_rename() {
        let mut p = blank_product();
        let mut edit = input();
        edit.name.en = "Completely Different".into();
        apply_input(&mut p, edit, Some("heat-resistant-glove")).unwrap();
        assert_eq!(p.slug, "heat-resistant-glove");
    }

    #[test]
    fn test_apply_input_requires_name_and_category() {
        let mut p = blank_product();
        let mut missing_name = input();
        missing_name.name = LocalizedText::default();
        assert!(matches!(
            apply_input(&mut p, missing_name, None),
            Err(HandlineError::Validation(_))
        ));

        let mut missing_category = input();
        missing_category.category = "  ".into();
        assert!(apply_input(&mut p, missing_category, None).is_err());
    }

    #[test]
    fn test_product_view_falls_back_to_base_field() {
        let mut p = blank_product();
        p.name = "Legacy".into();
        p.name_locales = Some(LocalizedText::new("English", ""));
        assert_eq!(ProductView::localize(&p, Locale::It).name, "Legacy");
        assert_eq!(ProductView::localize(&p, Locale::En).name, "English");
    }
}
