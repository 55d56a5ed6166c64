//! 目录浏览：分面过滤、计数、分页（通过 CatalogService，真实 SQLite）

mod common;

use common::{product_input, temp_storage};
use handline::catalog::{ClassKey, FacetQuery, ProductFacets};
use handline::content::Locale;
use handline::services::ProductInput;
use handline::storage::{ClothingAttributes, En388Rating, ProductFlag, SafetyRatings};

fn cut_glove(name: &str, cut: &str, flags: Vec<ProductFlag>) -> ProductInput {
    ProductInput {
        safety: SafetyRatings {
            en388: Some(En388Rating {
                cut: Some(cut.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        },
        flags,
        ..product_input(name, "cut-resistant")
    }
}

fn jacket(name: &str, garment: &str, class: &str) -> ProductInput {
    ProductInput {
        category: "clothing".to_string(),
        sub_category: Some("hi-vis".to_string()),
        sizes: vec!["L".to_string(), "XL".to_string()],
        clothing: ClothingAttributes {
            garment_type: Some(garment.to_string()),
            protection_class: Some(class.to_string()),
        },
        flags: vec![ProductFlag::HighVisibility],
        ..product_input(name, "hi-vis")
    }
}

async fn seeded() -> common::TestEnv {
    let env = temp_storage().await;
    let catalog = env.catalog();
    for input in [
        cut_glove("Blade Guard 3", "3", vec![ProductFlag::Touchscreen]),
        cut_glove("Blade Guard 5", "5", vec![ProductFlag::Waterproof]),
        jacket("Beacon Parka", "Winter Parka", "3"),
        jacket("Beacon Vest", "Vest", "2"),
    ] {
        catalog.create(input).await.unwrap();
    }
    env
}

async fn names(env: &common::TestEnv, facets: &ProductFacets) -> Vec<String> {
    env.catalog()
        .browse(facets, Locale::En, 1, 50)
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|p| p.name)
        .collect()
}

#[tokio::test]
async fn test_empty_selection_returns_everything_sorted_by_name() {
    let env = seeded().await;
    assert_eq!(
        names(&env, &ProductFacets::default()).await,
        vec![
            "Beacon Parka",
            "Beacon Vest",
            "Blade Guard 3",
            "Blade Guard 5"
        ]
    );
}

#[tokio::test]
async fn test_values_within_a_facet_are_ored_and_facets_are_anded() {
    let env = seeded().await;
    let query = FacetQuery {
        categories: Some("gloves,clothing".to_string()),
        sizes: Some("XL".to_string()),
        ..Default::default()
    };
    let facets = ProductFacets::from_query(&query).unwrap();
    assert_eq!(names(&env, &facets).await, vec!["Beacon Parka", "Beacon Vest"]);
}

#[tokio::test]
async fn test_class_filter_matches_exact_rating() {
    let env = seeded().await;
    let query = FacetQuery {
        classes: Some("en388_cut:5".to_string()),
        ..Default::default()
    };
    let facets = ProductFacets::from_query(&query).unwrap();
    assert!(facets.classes.contains_key(&ClassKey::En388Cut));
    assert_eq!(names(&env, &facets).await, vec!["Blade Guard 5"]);

    let query = FacetQuery {
        classes: Some("clothing_class:2|3".to_string()),
        ..Default::default()
    };
    let facets = ProductFacets::from_query(&query).unwrap();
    assert_eq!(names(&env, &facets).await, vec!["Beacon Parka", "Beacon Vest"]);
}

#[tokio::test]
async fn test_garment_type_is_case_insensitive_substring() {
    let env = seeded().await;
    let facets = ProductFacets {
        garment_type: Some("parka".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&env, &facets).await, vec!["Beacon Parka"]);
}

#[tokio::test]
async fn test_flags_require_every_selected_flag() {
    let env = seeded().await;
    let query = FacetQuery {
        flags: Some("touchscreen".to_string()),
        ..Default::default()
    };
    let facets = ProductFacets::from_query(&query).unwrap();
    assert_eq!(names(&env, &facets).await, vec!["Blade Guard 3"]);

    let query = FacetQuery {
        flags: Some("touchscreen,waterproof".to_string()),
        ..Default::default()
    };
    let facets = ProductFacets::from_query(&query).unwrap();
    assert!(names(&env, &facets).await.is_empty());
}

#[tokio::test]
async fn test_facet_counts_cover_published_products() {
    let env = seeded().await;
    env.catalog()
        .create(ProductInput {
            published: false,
            ..jacket("Hidden Coat", "Coat", "1")
        })
        .await
        .unwrap();

    let counts = env.catalog().facet_counts().await.unwrap();
    let clothing = counts
        .categories
        .iter()
        .find(|c| c.value == "clothing")
        .unwrap();
    assert_eq!(clothing.count, 2);
    assert!(counts.garment_types.iter().all(|g| g.value != "Coat"));
}

#[tokio::test]
async fn test_browse_pages_after_filtering() {
    let env = seeded().await;
    let catalog = env.catalog();
    let page = catalog
        .browse(&ProductFacets::default(), Locale::It, 2, 3)
        .await
        .unwrap();
    assert_eq!(page.total, 4);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Blade Guard 5 IT");
}
