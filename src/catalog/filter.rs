//! Faceted product filter
//!
//! A selection is a set of independently toggled facets. A product passes
//! when it satisfies every non-empty facet; an empty facet matches anything.
//! Missing attributes never match and never fail.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

use crate::errors::{HandlineError, Result};
use crate::storage::models::{Product, ProductFlag};

/// Set of selected values for one filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facet<T: Ord> {
    selected: BTreeSet<T>,
}

impl<T: Ord> Default for Facet<T> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }
}

impl<T: Ord> FromIterator<T> for Facet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord> Facet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` if absent, deselect it if present.
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, value: T) -> bool {
        if self.selected.remove(&value) {
            false
        } else {
            self.selected.insert(value);
            true
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.selected.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.selected.iter()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

impl Facet<String> {
    /// Vacuous on an empty facet, otherwise the value must be selected.
    fn admits(&self, value: Option<&str>) -> bool {
        self.is_empty() || value.is_some_and(|v| self.selected.contains(v))
    }

    /// Vacuous on an empty facet, otherwise at least one value is selected.
    fn admits_any(&self, values: &[String]) -> bool {
        self.is_empty() || values.iter().any(|v| self.selected.contains(v))
    }
}

/// Rating attributes that can be filtered by class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, AsRefStr,
)]
pub enum ClassKey {
    #[strum(serialize = "en388_abrasion")]
    En388Abrasion,
    #[strum(serialize = "en388_cut")]
    En388Cut,
    #[strum(serialize = "en388_tear")]
    En388Tear,
    #[strum(serialize = "en388_puncture")]
    En388Puncture,
    #[strum(serialize = "en388_cut_iso")]
    En388CutIso,
    #[strum(serialize = "en388_impact")]
    En388Impact,
    #[strum(serialize = "en407_burning")]
    En407Burning,
    #[strum(serialize = "en407_contact")]
    En407Contact,
    #[strum(serialize = "en407_convective")]
    En407Convective,
    #[strum(serialize = "en407_radiant")]
    En407Radiant,
    #[strum(serialize = "en407_small_splashes")]
    En407SmallSplashes,
    #[strum(serialize = "en407_large_splashes")]
    En407LargeSplashes,
    #[strum(serialize = "en511_convective")]
    En511Convective,
    #[strum(serialize = "en511_contact")]
    En511Contact,
    #[strum(serialize = "en511_water")]
    En511Water,
    #[strum(serialize = "clothing_class")]
    ClothingClass,
}

impl ClassKey {
    pub fn all_names() -> Vec<String> {
        Self::iter().map(|k| k.as_ref().to_string()).collect()
    }
}

// JSON bodies use the same snake_case names as the query string
impl Serialize for ClassKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for ClassKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClassKey::from_str(&raw)
            .map_err(|_| serde::de::Error::custom(format!("unknown class key '{}'", raw)))
    }
}

impl Product {
    /// Rating value for a class facet, `None` when the attribute path is missing.
    pub fn class_value(&self, key: ClassKey) -> Option<&str> {
        let safety = &self.safety;
        let value = match key {
            ClassKey::En388Abrasion => safety.en388.as_ref()?.abrasion.as_ref(),
            ClassKey::En388Cut => safety.en388.as_ref()?.cut.as_ref(),
            ClassKey::En388Tear => safety.en388.as_ref()?.tear.as_ref(),
            ClassKey::En388Puncture => safety.en388.as_ref()?.puncture.as_ref(),
            ClassKey::En388CutIso => safety.en388.as_ref()?.cut_iso.as_ref(),
            ClassKey::En388Impact => safety.en388.as_ref()?.impact.as_ref(),
            ClassKey::En407Burning => safety.en407.as_ref()?.burning.as_ref(),
            ClassKey::En407Contact => safety.en407.as_ref()?.contact_heat.as_ref(),
            ClassKey::En407Convective => safety.en407.as_ref()?.convective_heat.as_ref(),
            ClassKey::En407Radiant => safety.en407.as_ref()?.radiant_heat.as_ref(),
            ClassKey::En407SmallSplashes => safety.en407.as_ref()?.small_splashes.as_ref(),
            ClassKey::En407LargeSplashes => safety.en407.as_ref()?.large_splashes.as_ref(),
            ClassKey::En511Convective => safety.en511.as_ref()?.convective_cold.as_ref(),
            ClassKey::En511Contact => safety.en511.as_ref()?.contact_cold.as_ref(),
            ClassKey::En511Water => safety.en511.as_ref()?.water.as_ref(),
            ClassKey::ClothingClass => self.clothing.protection_class.as_ref(),
        };
        value.map(String::as_str)
    }

    pub fn has_flag(&self, flag: ProductFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Raw facet parameters from a query string, comma separated
///
/// `sub_categories=a,b&classes=en388_cut:3|4,en511_water:1&flags=waterproof`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetQuery {
    pub categories: Option<String>,
    pub sub_categories: Option<String>,
    pub garment_type: Option<String>,
    pub en_standards: Option<String>,
    pub work_environments: Option<String>,
    pub sizes: Option<String>,
    pub classes: Option<String>,
    pub flags: Option<String>,
}

/// The full facet selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFacets {
    pub categories: Facet<String>,
    pub sub_categories: Facet<String>,
    /// Case-insensitive substring of the garment type
    pub garment_type: Option<String>,
    pub en_standards: Facet<String>,
    pub work_environments: Facet<String>,
    pub sizes: Facet<String>,
    pub classes: BTreeMap<ClassKey, Facet<String>>,
    pub flags: Facet<ProductFlag>,
}

impl ProductFacets {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.sub_categories.is_empty()
            && self.garment_type.as_deref().is_none_or(|g| g.trim().is_empty())
            && self.en_standards.is_empty()
            && self.work_environments.is_empty()
            && self.sizes.is_empty()
            && self.classes.values().all(Facet::is_empty)
            && self.flags.is_empty()
    }

    /// Conjunction of every facet predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.categories.admits(Some(product.category.as_str()))
            && self.sub_categories.admits(product.sub_category.as_deref())
            && self.matches_garment_type(product)
            && self.en_standards.admits_any(&product.en_standards)
            && self.work_environments.admits_any(&product.work_environments)
            && self.sizes.admits_any(&product.sizes)
            && self
                .classes
                .iter()
                .all(|(key, facet)| facet.admits(product.class_value(*key)))
            && self.flags.iter().all(|flag| product.has_flag(*flag))
    }

    fn matches_garment_type(&self, product: &Product) -> bool {
        let Some(needle) = self
            .garment_type
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();
        product
            .clothing
            .garment_type
            .as_deref()
            .is_some_and(|g| g.to_lowercase().contains(&needle))
    }

    /// Keep matching products, original order preserved.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }

    /// Build a selection from comma-separated query parameters.
    /// Unknown class keys or flags are rejected rather than silently ignored.
    pub fn from_query(query: &FacetQuery) -> Result<Self> {
        let mut facets = ProductFacets {
            categories: split_list(query.categories.as_deref()).collect(),
            sub_categories: split_list(query.sub_categories.as_deref()).collect(),
            garment_type: query
                .garment_type
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
            en_standards: split_list(query.en_standards.as_deref()).collect(),
            work_environments: split_list(query.work_environments.as_deref()).collect(),
            sizes: split_list(query.sizes.as_deref()).collect(),
            ..Default::default()
        };

        for raw in split_list(query.flags.as_deref()) {
            let flag = ProductFlag::from_str(&raw).map_err(|_| {
                HandlineError::validation(format!(
                    "Unknown flag '{}'. Valid: {}",
                    raw,
                    ProductFlag::all_names().join(", ")
                ))
            })?;
            facets.flags.toggle(flag);
        }

        for entry in split_list(query.classes.as_deref()) {
            let Some((key, values)) = entry.split_once(':') else {
                return Err(HandlineError::validation(format!(
                    "Invalid class filter '{}', expected key:value|value",
                    entry
                )));
            };
            let key = ClassKey::from_str(key.trim()).map_err(|_| {
                HandlineError::validation(format!(
                    "Unknown class key '{}'. Valid: {}",
                    key,
                    ClassKey::all_names().join(", ")
                ))
            })?;
            let facet = facets.classes.entry(key).or_default();
            for value in values.split('|').map(str::trim).filter(|v| !v.is_empty()) {
                facet.selected.insert(value.to_string());
            }
        }
        facets.classes.retain(|_, f| !f.is_empty());

        Ok(facets)
    }
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = String> + '_ {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{ClothingAttributes, En388Rating, SafetyRatings};
    use chrono::Utc;

    fn glove(slug: &str) -> Product {
        Product {
            id: slug.to_string(),
            slug: slug.to_string(),
            name: slug.to_string(),
            name_locales: None,
            description: String::new(),
            description_locales: None,
            category: "gloves".to_string(),
            sub_category: Some("cut-resistant".to_string()),
            brand_slug: None,
            image_url: None,
            gallery: vec![],
            en_standards: vec!["EN 388".to_string(), "EN 407".to_string()],
            sizes: vec!["8".to_string(), "9".to_string()],
            work_environments: vec!["construction".to_string()],
            features: None,
            safety: SafetyRatings {
                en388: Some(En388Rating {
                    cut: Some("3".to_string()),
                    abrasion: Some("4".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            },
            clothing: ClothingAttributes::default(),
            flags: vec![ProductFlag::Touchscreen],
            published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn jacket(slug: &str) -> Product {
        Product {
            category: "clothing".to_string(),
            sub_category: Some("outerwear".to_string()),
            en_standards: vec!["EN ISO 20471".to_string()],
            sizes: vec!["L".to_string()],
            work_environments: vec!["road works".to_string()],
            safety: SafetyRatings::default(),
            clothing: ClothingAttributes {
                garment_type: Some("Winter Jacket".to_string()),
                protection_class: Some("2".to_string()),
            },
            flags: vec![ProductFlag::HighVisibility, ProductFlag::Waterproof],
            ..glove(slug)
        }
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let facets = ProductFacets::default();
        assert!(facets.is_empty());
        assert!(facets.matches(&glove("a")));
        assert!(facets.matches(&jacket("b")));
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut facet: Facet<String> = ["8".to_string()].into_iter().collect();
        let original = facet.clone();

        assert!(facet.toggle("9".to_string()));
        assert!(!facet.toggle("9".to_string()));
        assert_eq!(facet, original);

        assert!(!facet.toggle("8".to_string()));
        assert!(facet.toggle("8".to_string()));
        assert_eq!(facet, original);
    }

    #[test]
    fn test_membership_facets() {
        let mut facets = ProductFacets::default();
        facets.sizes.toggle("9".to_string());
        facets.sizes.toggle("XL".to_string());
        assert!(facets.matches(&glove("a")));
        assert!(!facets.matches(&jacket("b")));

        facets.en_standards.toggle("EN 511".to_string());
        assert!(!facets.matches(&glove("a")));
    }

    #[test]
    fn test_sub_category_missing_does_not_match() {
        let mut facets = ProductFacets::default();
        facets.sub_categories.toggle("cut-resistant".to_string());

        let mut product = glove("a");
        assert!(facets.matches(&product));
        product.sub_category = None;
        assert!(!facets.matches(&product));
    }

    #[test]
    fn test_garment_type_substring_case_insensitive() {
        let facets = ProductFacets {
            garment_type: Some("jACKet".to_string()),
            ..Default::default()
        };
        assert!(facets.matches(&jacket("b")));
        assert!(!facets.matches(&glove("a")));

        let blank = ProductFacets {
            garment_type: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.matches(&glove("a")));
    }

    #[test]
    fn test_class_facet_uses_equality_only() {
        let mut facets = ProductFacets::default();
        facets
            .classes
            .entry(ClassKey::En388Cut)
            .or_default()
            .toggle("3".to_string());
        assert!(facets.matches(&glove("a")));
        // 缺少 EN 388 数据的产品不匹配
        assert!(!facets.matches(&jacket("b")));

        let mut higher = ProductFacets::default();
        higher
            .classes
            .entry(ClassKey::En388Cut)
            .or_default()
            .toggle("2".to_string());
        assert!(!higher.matches(&glove("a")));
    }

    #[test]
    fn test_flags_require_every_selected_flag() {
        let mut facets = ProductFacets::default();
        facets.flags.toggle(ProductFlag::Waterproof);
        assert!(facets.matches(&jacket("b")));
        assert!(!facets.matches(&glove("a")));

        facets.flags.toggle(ProductFlag::Antistatic);
        assert!(!facets.matches(&jacket("b")));
    }

    #[test]
    fn test_apply_keeps_order() {
        let mut facets = ProductFacets::default();
        facets.categories.toggle("gloves".to_string());
        let result = facets.apply(vec![glove("a"), jacket("b"), glove("c")]);
        let slugs: Vec<_> = result.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);
    }

    #[test]
    fn test_from_query_parses_lists_classes_and_flags() {
        let query = FacetQuery {
            sub_categories: Some("cut-resistant, outerwear,,".to_string()),
            classes: Some("en388_cut:3|4,clothing_class:2".to_string()),
            flags: Some("waterproof".to_string()),
            garment_type: Some(" ".to_string()),
            ..Default::default()
        };
        let facets = ProductFacets::from_query(&query).unwrap();
        assert_eq!(facets.sub_categories.len(), 2);
        assert_eq!(facets.classes[&ClassKey::En388Cut].len(), 2);
        assert!(facets.classes[&ClassKey::ClothingClass].contains(&"2".to_string()));
        assert!(facets.flags.contains(&ProductFlag::Waterproof));
        assert!(facets.garment_type.is_none());
    }

    #[test]
    fn test_from_query_rejects_unknown_names() {
        let bad_flag = FacetQuery {
            flags: Some("sparkly".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ProductFacets::from_query(&bad_flag),
            Err(HandlineError::Validation(_))
        ));

        let bad_class = FacetQuery {
            classes: Some("en999_magic:1".to_string()),
            ..Default::default()
        };
        assert!(ProductFacets::from_query(&bad_class).is_err());

        let no_colon = FacetQuery {
            classes: Some("en388_cut".to_string()),
            ..Default::default()
        };
        assert!(ProductFacets::from_query(&no_colon).is_err());
    }

    #[test]
    fn test_facets_json_round_trip_shape() {
        let json = r#"{"sizes":["9"],"classes":{"en388_cut":["3"]},"flags":["touchscreen"]}"#;
        let facets: ProductFacets = serde_json::from_str(json).unwrap();
        assert!(facets.matches(&glove("a")));
        assert!(facets.categories.is_empty());
    }
}
