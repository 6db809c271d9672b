//! # 设置和配置 Tauri Commands
//!
//! - `read_theme` / `toggle_theme` - 主题偏好（未保存时跟随系统）
//! - `read_client_config` / `save_client_config` - 读写 `~/.novaforge/client-config.json`
//!
//! 保存的客户端配置在下次启动时生效；`read_client_config` 返回的是文件内容，
//! 当前会话实际使用的配置由 `active_client_config` 提供。

use tauri::{State, Theme, WebviewWindow};

use crate::models::settings::{ClientConfig, ThemePreference};
use crate::services::config;
use crate::services::studio::Studio;
use crate::utils::path;

/// 系统是否偏好深色主题；无法读取时按浅色处理
fn system_prefers_dark(window: &WebviewWindow) -> bool {
    matches!(window.theme(), Ok(Theme::Dark))
}

/// 读取当前生效的主题
#[tauri::command]
pub async fn read_theme(
    window: WebviewWindow,
    studio: State<'_, Studio>,
) -> Result<ThemePreference, String> {
    Ok(studio.theme(system_prefers_dark(&window)).await)
}

/// 切换主题并持久化，返回切换后的主题
#[tauri::command]
pub async fn toggle_theme(
    window: WebviewWindow,
    studio: State<'_, Studio>,
) -> Result<ThemePreference, String> {
    studio.toggle_theme(system_prefers_dark(&window)).await
}

/// 读取客户端配置文件；文件不存在时返回默认配置
#[tauri::command]
pub async fn read_client_config() -> Result<ClientConfig, String> {
    let data_dir = path::get_app_data_path()?;
    config::read_config(&data_dir).await
}

/// 保存客户端配置文件（下次启动时生效）
#[tauri::command]
pub async fn save_client_config(config: ClientConfig) -> Result<(), String> {
    let data_dir = path::get_app_data_path()?;
    config::save_config(&data_dir, &config).await?;
    log::info!("客户端配置已保存，下次启动时生效");
    Ok(())
}

/// 当前会话实际使用的配置（包含环境变量覆盖）
#[tauri::command]
pub fn active_client_config(studio: State<'_, Studio>) -> ClientConfig {
    studio.config().clone()
}
