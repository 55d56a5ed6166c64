use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
        .load_full()
}

/// Initialize the global configuration from `config.toml` + `HL__*` env
pub fn init_config() {
    init_config_with_path(None);
}

/// Initialize the global configuration from an explicit file
///
/// Only the first call has any effect.
pub fn init_config_with_path(path: Option<String>) {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load(path.as_deref())));
}

/// 原子替换当前配置（初始化前调用会先加载默认配置）
///
/// 启动阶段用于写回哈希后的密码和生成的 JWT 密钥。
pub fn update_config<F>(f: F)
where
    F: FnOnce(&mut StaticConfig),
{
    let swap = CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load(None)));
    let mut next = StaticConfig::clone(&swap.load());
    f(&mut next);
    swap.store(Arc::new(next));
}
