//! Sea-ORM Model <-> 领域模型转换
//!
//! 属性包和多语言字段以 JSON 文本存储；读取时解析失败按缺省处理，不让一条坏数据拖垮整个列表。

use std::str::FromStr;

use sea_orm::ActiveValue::{NotSet, Set};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::content::parse_locales;
use crate::storage::models::{
    Brand, Message, Post, PostKind, PpeCategory, PpeSection, Product, ProductFlag,
};
use migration::entities::{brand, message, post, ppe_category, ppe_section, product};

fn parse_column<T: DeserializeOwned + Default>(raw: Option<&str>, column: &str) -> T {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty() && *r != "null") else {
        return T::default();
    };
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Ignoring malformed {} column: {}", column, e);
        T::default()
    })
}

fn to_column<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

fn to_optional_column<T: Serialize>(value: Option<&T>) -> Option<String> {
    value.and_then(to_column)
}

/// 单个未知 flag 只丢弃自己，不影响其他
fn parse_flags(raw: Option<&str>) -> Vec<ProductFlag> {
    let names: Vec<String> = parse_column(raw, "flags");
    let mut flags: Vec<ProductFlag> = names
        .iter()
        .filter_map(|n| match ProductFlag::from_str(n) {
            Ok(f) => Some(f),
            Err(_) => {
                warn!("Dropping unknown product flag '{}'", n);
                None
            }
        })
        .collect();
    flags.sort();
    flags.dedup();
    flags
}

pub fn model_to_product(model: product::Model) -> Product {
    Product {
        name_locales: parse_locales(model.name_locales.as_deref()),
        description_locales: parse_locales(model.description_locales.as_deref()),
        gallery: parse_column(model.gallery.as_deref(), "gallery"),
        en_standards: parse_column(model.en_standards.as_deref(), "en_standards"),
        sizes: parse_column(model.sizes.as_deref(), "sizes"),
        work_environments: parse_column(model.work_environments.as_deref(), "work_environments"),
        features: parse_locales(model.features_locales.as_deref()),
        safety: parse_column(model.safety.as_deref(), "safety"),
        clothing: parse_column(model.clothing.as_deref(), "clothing"),
        flags: parse_flags(model.flags.as_deref()),
        id: model.id,
        slug: model.slug,
        name: model.name,
        description: model.description,
        category: model.category,
        sub_category: model.sub_category,
        brand_slug: model.brand_slug,
        image_url: model.image_url,
        published: model.published,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// `is_new = false` 时不覆盖 created_at
pub fn product_to_active_model(p: &Product, is_new: bool) -> product::ActiveModel {
    let flags: Vec<&str> = p.flags.iter().map(|f| f.as_ref()).collect();
    product::ActiveModel {
        id: Set(p.id.clone()),
        slug: Set(p.slug.clone()),
        name: Set(p.name.clone()),
        name_locales: Set(to_optional_column(p.name_locales.as_ref())),
        description: Set(p.description.clone()),
        description_locales: Set(to_optional_column(p.description_locales.as_ref())),
        category: Set(p.category.clone()),
        sub_category: Set(p.sub_category.clone()),
        brand_slug: Set(p.brand_slug.clone()),
        image_url: Set(p.image_url.clone()),
        gallery: Set(to_column(&p.gallery)),
        en_standards: Set(to_column(&p.en_standards)),
        sizes: Set(to_column(&p.sizes)),
        work_environments: Set(to_column(&p.work_environments)),
        features_locales: Set(to_optional_column(p.features.as_ref())),
        safety: Set(to_column(&p.safety)),
        clothing: Set(to_column(&p.clothing)),
        flags: Set(to_column(&flags)),
        published: Set(p.published),
        created_at: if is_new { Set(p.created_at) } else { NotSet },
        updated_at: Set(p.updated_at),
    }
}

pub fn model_to_brand(model: brand::Model) -> Brand {
    Brand {
        description_locales: parse_locales(model.description_locales.as_deref()),
        id: model.id,
        slug: model.slug,
        name: model.name,
        description: model.description,
        logo_url: model.logo_url,
        website: model.website,
        sort_order: model.sort_order,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn brand_to_active_model(b: &Brand, is_new: bool) -> brand::ActiveModel {
    brand::ActiveModel {
        id: Set(b.id.clone()),
        slug: Set(b.slug.clone()),
        name: Set(b.name.clone()),
        description: Set(b.description.clone()),
        description_locales: Set(to_optional_column(b.description_locales.as_ref())),
        logo_url: Set(b.logo_url.clone()),
        website: Set(b.website.clone()),
        sort_order: Set(b.sort_order),
        created_at: if is_new { Set(b.created_at) } else { NotSet },
        updated_at: Set(b.updated_at),
    }
}

pub fn model_to_post(model: post::Model) -> Post {
    let kind = PostKind::from_str(&model.kind).unwrap_or_else(|_| {
        warn!("Post {} has unknown kind '{}', treating as blog", model.id, model.kind);
        PostKind::Blog
    });
    Post {
        kind,
        title_locales: parse_locales(model.title_locales.as_deref()),
        summary_locales: parse_locales(model.summary_locales.as_deref()),
        body_locales: parse_locales(model.body_locales.as_deref()),
        tags: parse_locales(model.tags_locales.as_deref()),
        details: parse_column(model.details.as_deref(), "details"),
        id: model.id,
        slug: model.slug,
        title: model.title,
        summary: model.summary,
        body: model.body,
        image_url: model.image_url,
        published: model.published,
        published_at: model.published_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn post_to_active_model(p: &Post, is_new: bool) -> post::ActiveModel {
    post::ActiveModel {
        id: Set(p.id.clone()),
        kind: Set(p.kind.to_string()),
        slug: Set(p.slug.clone()),
        title: Set(p.title.clone()),
        title_locales: Set(to_optional_column(p.title_locales.as_ref())),
        summary: Set(p.summary.clone()),
        summary_locales: Set(to_optional_column(p.summary_locales.as_ref())),
        body: Set(p.body.clone()),
        body_locales: Set(to_optional_column(p.body_locales.as_ref())),
        image_url: Set(p.image_url.clone()),
        tags_locales: Set(to_optional_column(p.tags.as_ref())),
        details: Set(if p.details.is_empty() {
            None
        } else {
            to_column(&p.details)
        }),
        published: Set(p.published),
        published_at: Set(p.published_at),
        created_at: if is_new { Set(p.created_at) } else { NotSet },
        updated_at: Set(p.updated_at),
    }
}

pub fn model_to_ppe_category(model: ppe_category::Model) -> PpeCategory {
    PpeCategory {
        title_locales: parse_locales(model.title_locales.as_deref()),
        description_locales: parse_locales(model.description_locales.as_deref()),
        id: model.id,
        slug: model.slug,
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        sort_order: model.sort_order,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn ppe_category_to_active_model(c: &PpeCategory, is_new: bool) -> ppe_category::ActiveModel {
    ppe_category::ActiveModel {
        id: Set(c.id.clone()),
        slug: Set(c.slug.clone()),
        title: Set(c.title.clone()),
        title_locales: Set(to_optional_column(c.title_locales.as_ref())),
        description: Set(c.description.clone()),
        description_locales: Set(to_optional_column(c.description_locales.as_ref())),
        image_url: Set(c.image_url.clone()),
        sort_order: Set(c.sort_order),
        created_at: if is_new { Set(c.created_at) } else { NotSet },
        updated_at: Set(c.updated_at),
    }
}

pub fn model_to_ppe_section(model: ppe_section::Model) -> PpeSection {
    PpeSection {
        title_locales: parse_locales(model.title_locales.as_deref()),
        body_locales: parse_locales(model.body_locales.as_deref()),
        id: model.id,
        category_id: model.category_id,
        title: model.title,
        body: model.body,
        sort_order: model.sort_order,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn ppe_section_to_active_model(s: &PpeSection, is_new: bool) -> ppe_section::ActiveModel {
    ppe_section::ActiveModel {
        id: Set(s.id.clone()),
        category_id: Set(s.category_id.clone()),
        title: Set(s.title.clone()),
        title_locales: Set(to_optional_column(s.title_locales.as_ref())),
        body: Set(s.body.clone()),
        body_locales: Set(to_optional_column(s.body_locales.as_ref())),
        sort_order: Set(s.sort_order),
        created_at: if is_new { Set(s.created_at) } else { NotSet },
        updated_at: Set(s.updated_at),
    }
}

pub fn model_to_message(model: message::Model) -> Message {
    Message {
        id: model.id,
        name: model.name,
        email: model.email,
        company: model.company,
        phone: model.phone,
        subject: model.subject,
        body: model.body,
        read: model.is_read,
        created_at: model.created_at,
    }
}

pub fn message_to_active_model(m: &Message) -> message::ActiveModel {
    message::ActiveModel {
        id: Set(m.id.clone()),
        name: Set(m.name.clone()),
        email: Set(m.email.clone()),
        company: Set(m.company.clone()),
        phone: Set(m.phone.clone()),
        subject: Set(m.subject.clone()),
        body: Set(m.body.clone()),
        is_read: Set(m.read),
        created_at: Set(m.created_at),
    }
}
