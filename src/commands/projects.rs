//! # 项目相关 Tauri Commands
//!
//! - `current_project` - 当前项目标识（启动时从持久化存储恢复）
//! - `list_projects` - 服务端已保存的项目名称
//! - `check_backend` - 生成服务健康检查
//! - `reveal_archive` - 在系统文件管理器中定位下载的归档

use std::path::Path;

use tauri::State;

use crate::models::project::HealthStatus;
use crate::services::studio::Studio;

/// 获取当前项目名称，尚未生成过项目时返回 `null`
#[tauri::command]
pub fn current_project(studio: State<'_, Studio>) -> Option<String> {
    studio.project().current()
}

/// 列出服务端已保存的项目名称
#[tauri::command]
pub async fn list_projects(studio: State<'_, Studio>) -> Result<Vec<String>, String> {
    studio.api().list_projects().await.map_err(|e| {
        log::warn!("读取服务端项目列表失败: {}", e);
        e.to_string()
    })
}

/// 检查生成服务是否可用
#[tauri::command]
pub async fn check_backend(studio: State<'_, Studio>) -> Result<HealthStatus, String> {
    studio.api().health().await.map_err(|e| {
        log::warn!("生成服务健康检查失败 ({}): {}", studio.config().api_url, e);
        e.to_string()
    })
}

/// 在系统文件管理器中定位归档文件
///
/// 使用 `tauri-plugin-opener` 调用 OS 原生 API。
///
/// # 错误
/// 文件不存在或无法打开文件管理器时返回错误
#[tauri::command]
pub fn reveal_archive(location: String) -> Result<(), String> {
    let path = Path::new(&location);
    if !path.exists() {
        return Err(format!("归档文件不存在: {}", location));
    }
    tauri_plugin_opener::reveal_item_in_dir(path).map_err(|e| format!("定位归档文件失败: {}", e))
}
