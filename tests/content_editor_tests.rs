//! 多语言编辑器语义：语言切换、旧字段镜像、slug 保持、发布时间

mod common;

use common::temp_storage;
use handline::content::{Locale, LocaleDraft, LocalizedText, SlugField};
use handline::services::{PostInput, PpeCategoryInput};
use handline::storage::PostKind;

#[test]
fn test_switching_language_keeps_both_drafts() {
    let mut draft: LocaleDraft<String> = LocaleDraft::new(Locale::En);
    draft.input("Safety boots".to_string());
    draft.set_active(Locale::It);
    assert_eq!(draft.value(Locale::It), "");
    draft.input("Scarpe antinfortunistiche".to_string());
    draft.set_active(Locale::En);

    assert_eq!(draft.value(Locale::En), "Safety boots");
    let (legacy, payload) = draft.submit();
    assert_eq!(legacy, "Safety boots");
    assert_eq!(payload.unwrap().it, "Scarpe antinfortunistiche");
}

#[test]
fn test_slug_follows_title_until_edited() {
    let mut slug = SlugField::default();
    slug.on_title_change("Cold Store Gloves");
    assert_eq!(slug.value(), "cold-store-gloves");

    slug.override_with("Freezer Gloves");
    slug.on_title_change("Something else");
    assert_eq!(slug.value(), "freezer-gloves");
    assert!(slug.is_touched());
}

#[tokio::test]
async fn test_italian_edit_mirrors_into_legacy_column() {
    let env = temp_storage().await;
    let content = env.content();

    let post = content
        .create_post(
            PostKind::Blog,
            PostInput {
                title: LocalizedText::new("Winter workwear", ""),
                published: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let first_published = post.published_at.expect("published_at set");

    let updated = content
        .update_post(
            PostKind::Blog,
            &post.id,
            PostInput {
                active_locale: Locale::It,
                title: LocalizedText::new("Winter workwear", "Abbigliamento invernale"),
                published: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Abbigliamento invernale");
    assert_eq!(updated.slug, "winter-workwear");
    assert_eq!(updated.published_at, Some(first_published));
    assert_eq!(
        updated.title_locales.as_ref().map(|t| t.en.as_str()),
        Some("Winter workwear")
    );

    let unpublished = content
        .update_post(
            PostKind::Blog,
            &post.id,
            PostInput {
                title: LocalizedText::new("Winter workwear", ""),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(unpublished.published_at.is_none());
}

#[tokio::test]
async fn test_blank_translations_are_not_stored() {
    let env = temp_storage().await;
    let category = env
        .content()
        .create_ppe_category(PpeCategoryInput {
            title: LocalizedText::new("Fall arrest", ""),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(category.title, "Fall arrest");
    assert!(category.description_locales.is_none());
}

#[tokio::test]
async fn test_explicit_slug_conflict_across_same_kind_only() {
    let env = temp_storage().await;
    let content = env.content();
    let input = || PostInput {
        slug: Some("shared-slug".to_string()),
        title: LocalizedText::new("Anything", ""),
        ..Default::default()
    };

    content.create_post(PostKind::Blog, input()).await.unwrap();
    let err = content.create_post(PostKind::Blog, input()).await.unwrap_err();
    assert!(matches!(err, handline::errors::HandlineError::Conflict(_)));

    // 不同类型可以复用 slug
    content
        .create_post(PostKind::CaseStudy, input())
        .await
        .unwrap();
}
