//! Sidebar facet counts

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;
use crate::storage::models::Product;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

/// Distinct values and how many products carry each one
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct FacetCounts {
    pub categories: Vec<FacetCount>,
    pub sub_categories: Vec<FacetCount>,
    pub garment_types: Vec<FacetCount>,
    pub en_standards: Vec<FacetCount>,
    pub work_environments: Vec<FacetCount>,
    pub sizes: Vec<FacetCount>,
    pub flags: Vec<FacetCount>,
}

#[derive(Default)]
struct Tally(BTreeMap<String, u64>);

impl Tally {
    fn add(&mut self, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            *self.0.entry(value.to_string()).or_insert(0) += 1;
        }
    }

    /// 同一产品里重复的值只计一次
    fn add_distinct<'a>(&mut self, values: impl IntoIterator<Item = &'a str>) {
        let mut seen: Vec<&str> = Vec::new();
        for v in values {
            let v = v.trim();
            if !seen.contains(&v) {
                seen.push(v);
                self.add(v);
            }
        }
    }

    fn finish(self) -> Vec<FacetCount> {
        self.0
            .into_iter()
            .map(|(value, count)| FacetCount { value, count })
            .collect()
    }
}

impl FacetCounts {
    pub fn compute(products: &[Product]) -> Self {
        let mut categories = Tally::default();
        let mut sub_categories = Tally::default();
        let mut garment_types = Tally::default();
        let mut en_standards = Tally::default();
        let mut work_environments = Tally::default();
        let mut sizes = Tally::default();
        let mut flags = Tally::default();

        for p in products {
            categories.add(&p.category);
            if let Some(sub) = p.sub_category.as_deref() {
                sub_categories.add(sub);
            }
            if let Some(garment) = p.clothing.garment_type.as_deref() {
                garment_types.add(garment);
            }
            en_standards.add_distinct(p.en_standards.iter().map(String::as_str));
            work_environments.add_distinct(p.work_environments.iter().map(String::as_str));
            sizes.add_distinct(p.sizes.iter().map(String::as_str));
            flags.add_distinct(p.flags.iter().map(|f| f.as_ref()));
        }

        Self {
            categories: categories.finish(),
            sub_categories: sub_categories.finish(),
            garment_types: garment_types.finish(),
            en_standards: en_standards.finish(),
            work_environments: work_environments.finish(),
            sizes: sizes.finish(),
            flags: flags.finish(),
        }
    }
}
