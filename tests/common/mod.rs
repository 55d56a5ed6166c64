//! 集成测试公共设施
//!
//! 每个测试使用独立的临时 SQLite 数据库；全局配置只初始化一次。

#![allow(dead_code)]

use std::sync::{Arc, Once};

use actix_web::test;
use serde_json::Value;
use tempfile::TempDir;

use handline::config::{DatabaseConfig, get_config, update_config};
use handline::content::{Locale, LocalizedList, LocalizedText};
use handline::runtime::lifetime::startup::StartupContext;
use handline::runtime::modes::server::AppState;
use handline::services::{
    CatalogService, ContentService, InboxService, NoopNotifier, OrderService, ProductInput,
    SearchService,
};
use handline::storage::backend::SeaOrmStorage;
use handline::storage::{ProductFlag, SafetyRatings};
use handline::utils::password::hash_password;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

static INIT: Once = Once::new();

/// 后台密码（Argon2）与固定 JWT 密钥，整个测试进程共享
pub fn init_test_config() {
    INIT.call_once(|| {
        let hash = hash_password(TEST_PASSWORD).expect("hash test password");
        update_config(|c| {
            c.api.admin_password = hash;
            c.api.jwt_secret = "integration-test-secret-0123456789abcdef".to_string();
            c.api.cookie_secure = false;
        });
    });
}

pub struct TestEnv {
    // 必须持有，否则数据库文件被删除
    _dir: TempDir,
    pub storage: Arc<SeaOrmStorage>,
}

pub async fn temp_storage() -> TestEnv {
    init_test_config();
    let dir = TempDir::new().expect("创建临时目录失败");
    let db_path = dir.path().join("handline_test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..Default::default()
    };
    let storage = Arc::new(
        SeaOrmStorage::new(&config, "sqlite")
            .await
            .expect("创建存储失败"),
    );
    TestEnv { _dir: dir, storage }
}

impl TestEnv {
    pub fn state(&self) -> AppState {
        AppState::from(StartupContext {
            storage: self.storage.clone(),
            catalog: CatalogService::new(self.storage.clone()),
            content: ContentService::new(self.storage.clone()),
            inbox: InboxService::new(self.storage.clone(), Arc::new(NoopNotifier)),
            search: SearchService::new(self.storage.clone()),
            orders: OrderService::new(),
        })
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.storage.clone())
    }

    pub fn content(&self) -> ContentService {
        ContentService::new(self.storage.clone())
    }
}

/// 构建与生产相同路由的测试服务
#[macro_export]
macro_rules! init_app {
    ($env:expr) => {{
        let state = $env.state();
        let routes = handline::config::get_config().routes.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(move |cfg| handline::runtime::modes::server::configure_app(cfg, &state, &routes)),
        )
        .await
    }};
}

pub fn api(path: &str) -> String {
    format!("{}{}", get_config().routes.api_prefix, path)
}

pub fn admin(path: &str) -> String {
    format!("{}/v1{}", get_config().routes.admin_prefix, path)
}

pub fn peer() -> std::net::SocketAddr {
    "203.0.113.7:40000".parse().unwrap()
}

pub async fn read_json(resp: actix_web::dev::ServiceResponse) -> Value {
    let bytes = test::read_body(resp).await;
    serde_json::from_slice(&bytes).expect("响应不是 JSON")
}

/// 已发布的测试产品
pub fn product_input(name: &str, sub_category: &str) -> ProductInput {
    ProductInput {
        active_locale: Locale::En,
        name: LocalizedText::new(name, format!("{} IT", name)),
        description: LocalizedText::new(format!("{} description", name), ""),
        category: "gloves".to_string(),
        sub_category: Some(sub_category.to_string()),
        en_standards: vec!["EN 388".to_string()],
        sizes: vec!["8".to_string(), "9".to_string()],
        work_environments: vec!["construction".to_string()],
        features: LocalizedList {
            en: vec!["Grip".to_string()],
            it: vec!["Presa".to_string()],
        },
        safety: SafetyRatings::default(),
        flags: vec![ProductFlag::Touchscreen],
        published: true,
        ..Default::default()
    }
}
