//! # 显示偏好
//!
//! 主题偏好与项目标识共用同一个持久化存储，但与工作流没有任何耦合。

use crate::models::settings::ThemePreference;
use crate::services::store::KeyValueStore;

/// 主题偏好在持久化存储中的键
pub const THEME_KEY: &str = "theme";

/// 读取生效的主题：已保存的偏好优先，否则跟随系统
pub async fn read_theme(store: &dyn KeyValueStore, system_prefers_dark: bool) -> ThemePreference {
    let stored = match store.get(THEME_KEY).await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("读取主题偏好失败: {}", e);
            None
        }
    };
    ThemePreference::resolve(stored.as_deref(), system_prefers_dark)
}

/// 切换主题并保存，返回切换后的主题
pub async fn toggle_theme(
    store: &dyn KeyValueStore,
    system_prefers_dark: bool,
) -> Result<ThemePreference, String> {
    let next = read_theme(store, system_prefers_dark).await.toggled();
    store.set(THEME_KEY, next.as_str()).await?;
    Ok(next)
}
