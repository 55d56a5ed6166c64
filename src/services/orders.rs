//! Order tracking (mocked)
//!
//! There is no order backend; a fixed set of fixture orders is served. The
//! customer email acts as the lookup secret, so an order number with the
//! wrong email is reported as not found.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use strum::{AsRefStr, Display};
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;
use crate::errors::{HandlineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS, Display, AsRefStr)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct OrderItem {
    pub product_slug: String,
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct OrderEvent {
    pub status: OrderStatus,
    #[ts(type = "string")]
    pub at: DateTime<Utc>,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Order {
    pub number: String,
    #[serde(skip)]
    #[ts(skip)]
    pub customer_email: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub carrier: Option<String>,
    pub tracking_code: Option<String>,
    pub items: Vec<OrderItem>,
    /// 按时间先后
    pub timeline: Vec<OrderEvent>,
    #[ts(type = "string")]
    pub placed_at: DateTime<Utc>,
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

fn item(slug: &str, name: &str, size: Option<&str>, quantity: u32) -> OrderItem {
    OrderItem {
        product_slug: slug.to_string(),
        name: name.to_string(),
        size: size.map(str::to_string),
        quantity,
    }
}

fn event(status: OrderStatus, at: DateTime<Utc>, note: &str) -> OrderEvent {
    OrderEvent {
        status,
        at,
        note: note.to_string(),
    }
}

fn fixtures() -> Vec<Order> {
    use OrderStatus::*;

    vec![
        Order {
            number: "HL-100231".into(),
            customer_email: "giulia.ferri@cantieri-ferri.it".into(),
            customer_name: "Giulia Ferri".into(),
            status: Delivered,
            carrier: Some("BRT".into()),
            tracking_code: Some("BRT0012398871".into()),
            items: vec![
                item("nitrile-cut-5-glove", "Nitrile Cut 5 Glove", Some("9"), 120),
                item("thermo-grip-winter", "Thermo Grip Winter", Some("10"), 40),
            ],
            timeline: vec![
                event(Processing, at(2024, 3, 4, 9), "Order received"),
                event(Shipped, at(2024, 3, 5, 16), "Handed to carrier"),
                event(Delivered, at(2024, 3, 7, 11), "Delivered to site office"),
            ],
            placed_at: at(2024, 3, 4, 9),
        },
        Order {
            number: "HL-100245".into(),
            customer_email: "giulia.ferri@cantieri-ferri.it".into(),
            customer_name: "Giulia Ferri".into(),
            status: Shipped,
            carrier: Some("GLS".into()),
            tracking_code: Some("GLS55120933".into()),
            items: vec![item("hi-vis-parka-class-3", "Hi-Vis Parka Class 3", Some("L"), 15)],
            timeline: vec![
                event(Processing, at(2024, 4, 11, 10), "Order received"),
                event(Shipped, at(2024, 4, 12, 14), "Handed to carrier"),
            ],
            placed_at: at(2024, 4, 11, 10),
        },
        Order {
            number: "HL-100252".into(),
            customer_email: "acquisti@logisticanord.com".into(),
            customer_name: "Logistica Nord".into(),
            status: Processing,
            carrier: None,
            tracking_code: None,
            items: vec![
                item("chem-shield-374", "Chem Shield 374", Some("8"), 200),
                item("ffp3-valved-mask", "FFP3 Valved Mask", None, 500),
            ],
            timeline: vec![event(Processing, at(2024, 4, 18, 8), "Order received")],
            placed_at: at(2024, 4, 18, 8),
        },
        Order {
            number: "HL-100260".into(),
            customer_email: "acquisti@logisticanord.com".into(),
            customer_name: "Logistica Nord".into(),
            status: Cancelled,
            carrier: None,
            tracking_code: None,
            items: vec![item("s3-safety-boot", "S3 Safety Boot", Some("43"), 30)],
            timeline: vec![
                event(Processing, at(2024, 4, 20, 15), "Order received"),
                event(Cancelled, at(2024, 4, 21, 9), "Cancelled at customer request"),
            ],
            placed_at: at(2024, 4, 20, 15),
        },
    ]
}

pub struct OrderService {
    orders: Vec<Order>,
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderService {
    pub fn new() -> Self {
        Self { orders: fixtures() }
    }

    fn normalize_email(email: &str) -> Result<String> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(HandlineError::validation("Email is required"));
        }
        Ok(email)
    }

    /// 按订单号 + 邮箱查询；邮箱不匹配与订单不存在同样处理
    pub fn track(&self, number: &str, email: &str) -> Result<Order> {
        let email = Self::normalize_email(email)?;
        let number = number.trim();
        self.orders
            .iter()
            .find(|o| o.number.eq_ignore_ascii_case(number) && o.customer_email == email)
            .cloned()
            .ok_or_else(|| HandlineError::not_found(format!("Order '{}' not found", number)))
    }

    /// 该邮箱的所有订单，最新的在前
    pub fn list_for_email(&self, email: &str) -> Result<Vec<Order>> {
        let email = Self::normalize_email(email)?;
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.customer_email == email)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }
}
