//! SeaORM 存储层测试（临时 SQLite）

mod common;

use chrono::{Duration, Utc};

use common::temp_storage;
use handline::content::LocalizedText;
use handline::errors::HandlineError;
use handline::storage::{
    Message, MessageFilter, PpeCategory, PpeSection, Product, ProductFilter, ProductFlag,
    SafetyRatings,
};

fn product(id: &str, slug: &str, published: bool) -> Product {
    let now = Utc::now();
    Product {
        id: id.to_string(),
        slug: slug.to_string(),
        name: slug.replace('-', " "),
        name_locales: Some(LocalizedText::new(slug, format!("{} it", slug))),
        description: String::new(),
        description_locales: None,
        category: "gloves".to_string(),
        sub_category: Some("nitrile".to_string()),
        brand_slug: None,
        image_url: None,
        gallery: vec![],
        en_standards: vec!["EN 388".to_string()],
        sizes: vec!["9".to_string()],
        work_environments: vec![],
        features: None,
        safety: SafetyRatings::default(),
        clothing: Default::default(),
        flags: vec![ProductFlag::Waterproof],
        published,
        created_at: now,
        updated_at: now,
    }
}

fn message(id: &str, minutes_ago: i64, read: bool) -> Message {
    Message {
        id: id.to_string(),
        name: "Anna".to_string(),
        email: "anna@example.com".to_string(),
        company: None,
        phone: None,
        subject: "Website enquiry".to_string(),
        body: "Hello".to_string(),
        read,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

#[tokio::test]
async fn test_product_round_trip_keeps_json_columns() {
    let env = temp_storage().await;
    let p = product("p1", "grip-one", true);
    env.storage.insert_product(&p).await.unwrap();

    let loaded = env.storage.get_product("p1").await.unwrap().unwrap();
    assert_eq!(loaded.slug, "grip-one");
    assert_eq!(loaded.flags, vec![ProductFlag::Waterproof]);
    assert_eq!(loaded.en_standards, vec!["EN 388".to_string()]);
    assert_eq!(loaded.name_locales.unwrap().it, "grip-one it");

    let by_slug = env.storage.get_product_by_slug("grip-one").await.unwrap();
    assert_eq!(by_slug.map(|p| p.id), Some("p1".to_string()));
}

#[tokio::test]
async fn test_duplicate_slug_is_conflict() {
    let env = temp_storage().await;
    env.storage
        .insert_product(&product("p1", "same", true))
        .await
        .unwrap();
    let err = env
        .storage
        .insert_product(&product("p2", "same", true))
        .await
        .unwrap_err();
    assert!(matches!(err, HandlineError::Conflict(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_published_filter_and_counts() {
    let env = temp_storage().await;
    env.storage
        .insert_product(&product("p1", "a-glove", true))
        .await
        .unwrap();
    env.storage
        .insert_product(&product("p2", "b-glove", false))
        .await
        .unwrap();

    let published = ProductFilter {
        published_only: true,
        ..Default::default()
    };
    assert_eq!(env.storage.load_products(&published).await.unwrap().len(), 1);
    assert_eq!(
        env.storage
            .count_products(&ProductFilter::default())
            .await
            .unwrap(),
        2
    );

    let search = ProductFilter {
        search: Some("b-gl".to_string()),
        ..Default::default()
    };
    let page = env.storage.list_products(&search, 1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, "p2");
}

#[tokio::test]
async fn test_update_and_delete_missing_product() {
    let env = temp_storage().await;
    let err = env
        .storage
        .update_product(&product("ghost", "ghost", true))
        .await
        .unwrap_err();
    assert!(matches!(err, HandlineError::NotFound(_)));

    let err = env.storage.delete_product("ghost").await.unwrap_err();
    assert!(matches!(err, HandlineError::NotFound(_)));
}

#[tokio::test]
async fn test_messages_newest_first_and_unread_filter() {
    let env = temp_storage().await;
    env.storage.insert_message(&message("old", 30, true)).await.unwrap();
    env.storage.insert_message(&message("new", 1, false)).await.unwrap();

    let all = env
        .storage
        .list_messages(&MessageFilter::default(), 1, 10)
        .await
        .unwrap();
    assert_eq!(all.total, 2);
    assert_eq!(all.items[0].id, "new");

    let unread = MessageFilter { unread_only: true };
    assert_eq!(env.storage.count_messages(&unread).await.unwrap(), 1);

    env.storage.set_message_read("new", true).await.unwrap();
    assert_eq!(env.storage.count_messages(&unread).await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleting_ppe_category_removes_sections() {
    let env = temp_storage().await;
    let now = Utc::now();
    let category = PpeCategory {
        id: "c1".to_string(),
        slug: "hearing".to_string(),
        title: "Hearing".to_string(),
        title_locales: None,
        description: String::new(),
        description_locales: None,
        image_url: None,
        sort_order: 0,
        created_at: now,
        updated_at: now,
    };
    env.storage.insert_ppe_category(&category).await.unwrap();
    for (i, title) in ["Noise", "Plugs"].iter().enumerate() {
        env.storage
            .insert_ppe_section(&PpeSection {
                id: format!("s{}", i),
                category_id: "c1".to_string(),
                title: title.to_string(),
                title_locales: None,
                body: String::new(),
                body_locales: None,
                sort_order: i as i32,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }
    assert_eq!(env.storage.load_ppe_sections("c1").await.unwrap().len(), 2);

    env.storage.delete_ppe_category("c1").await.unwrap();
    assert!(env.storage.load_ppe_sections("c1").await.unwrap().is_empty());
    assert!(env.storage.get_ppe_section("s0").await.unwrap().is_none());
}

#[tokio::test]
async fn test_content_stats() {
    let env = temp_storage().await;
    env.storage
        .insert_product(&product("p1", "a", true))
        .await
        .unwrap();
    env.storage
        .insert_product(&product("p2", "b", false))
        .await
        .unwrap();
    env.storage.insert_message(&message("m1", 0, false)).await.unwrap();

    let stats = env.storage.content_stats().await.unwrap();
    assert_eq!(stats.products, 2);
    assert_eq!(stats.published_products, 1);
    assert_eq!(stats.messages, 1);
    assert_eq!(stats.unread_messages, 1);
    assert_eq!(stats.blog_posts, 0);
}
