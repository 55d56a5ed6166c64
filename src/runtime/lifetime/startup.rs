use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{StaticConfig, get_config, update_config};
use crate::services::{
    CatalogService, ContentService, InboxService, OrderService, SearchService,
    notifier_from_config,
};
use crate::storage::{SeaOrmStorage, StorageFactory};
use crate::utils::generate_secure_token;
use crate::utils::password::ensure_hashed;

/// 服务器运行所需的全部共享组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub catalog: CatalogService,
    pub content: ContentService,
    pub inbox: InboxService,
    pub search: SearchService,
    pub orders: OrderService,
}

/// 准备服务器启动的上下文
///
/// 顺序：TLS provider → 密钥处理 → 存储（含迁移）→ 服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    // 多次调用时 install_default 返回 Err，忽略即可
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    prepare_secrets().context("Failed to prepare admin credentials")?;

    let config = get_config();
    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let notifier = notifier_from_config(&config.notify);
    info!("New message notifier: {}", notifier.name());

    let context = StartupContext {
        catalog: CatalogService::new(storage.clone()),
        content: ContentService::new(storage.clone()),
        inbox: InboxService::new(storage.clone(), notifier),
        search: SearchService::new(storage.clone()),
        orders: OrderService::new(),
        storage,
    };

    check_component_enabled(&config);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}

/// 明文密码转为 Argon2 哈希，缺失的 JWT 密钥随机生成
///
/// 结果只写回内存中的配置，不修改配置文件。
pub fn prepare_secrets() -> Result<()> {
    let config = get_config();

    let (hashed, converted) = ensure_hashed(&config.api.admin_password)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    if converted {
        warn!(
            "api.admin_password is stored in plain text. \
            Run `handline hash-password` and put the hash in the config file."
        );
    }

    let generate_secret = config.api.jwt_secret.is_empty();
    if generate_secret {
        warn!("api.jwt_secret is not set, generated a random secret. Sessions will not survive a restart.");
    }

    if converted || generate_secret {
        update_config(|c| {
            c.api.admin_password = hashed;
            if generate_secret {
                c.api.jwt_secret = generate_secure_token(32);
            }
        });
    }
    Ok(())
}

fn check_component_enabled(config: &StaticConfig) {
    if config.api.jwt_secret.len() < 32 {
        warn!(
            "WARNING: JWT Secret is too short ({} bytes). \
            Recommended minimum is 32 bytes for security.",
            config.api.jwt_secret.len()
        );
    }

    if !config.api.cookie_secure {
        warn!(
            "WARNING: Cookie Secure flag is disabled. \
            Cookies will be sent over unencrypted HTTP connections."
        );
    }

    if config.admin_enabled() {
        info!("Admin API available at: {}", config.routes.admin_prefix);
    } else {
        info!("Admin API is disabled (api.admin_password not set)");
    }
    info!("Public API available at: {}", config.routes.api_prefix);
    info!("Health API available at: {}", config.routes.health_prefix);
}
