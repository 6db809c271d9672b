//! # NovaForge - 应用核心初始化模块
//!
//! NovaForge 是 AI 网站生成服务的桌面客户端：收集项目描述，请求远程生成服务，
//! 渲染生成的代码和实时预览，并支持增量添加功能、打包下载 ZIP 和部署。
//!
//! ## 架构说明
//! 编排核心（`services/`、`models/`、`utils/`）不依赖 Tauri，可以单独编译和测试；
//! Tauri 外壳（`bridge`、`commands/` 和本模块的 `run()`）位于 `desktop` feature 之后。
//! 通过将核心逻辑放在 `lib.rs` 而非 `main.rs` 中，
//! Tauri 可以在桌面端（`main.rs`）和移动端入口之间共享此初始化代码。
//!
//! ## 模块结构
//! - `bridge` - 把渲染、按钮、通知和交互接到 WebView 与原生对话框
//! - `commands/` - Tauri command 处理函数（IPC 接口层）
//! - `models/` - 数据模型（对应前端和生成服务的 JSON 结构）
//! - `services/` - 核心业务逻辑（远程接口、工作流、渲染、通知、持久化）
//! - `utils/` - 通用工具函数

#[cfg(feature = "desktop")]
mod bridge;
#[cfg(feature = "desktop")]
mod commands;
pub mod models;
pub mod services;
#[cfg(test)]
mod testing;
pub mod utils;

#[cfg(feature = "desktop")]
use std::sync::Arc;

#[cfg(feature = "desktop")]
use tauri::Manager;

#[cfg(feature = "desktop")]
use bridge::WebviewBridge;
#[cfg(feature = "desktop")]
use models::settings::ClientConfig;
#[cfg(feature = "desktop")]
use services::api::HttpGeneratorApi;
#[cfg(feature = "desktop")]
use services::archive::DirectorySink;
#[cfg(feature = "desktop")]
use services::config;
#[cfg(feature = "desktop")]
use services::store::{JsonFileStore, KeyValueStore, MemoryStore, STORAGE_FILE_NAME};
#[cfg(feature = "desktop")]
use services::studio::{Studio, StudioParts};

// `#[cfg_attr(mobile, tauri::mobile_entry_point)]`：当目标平台为移动端时，
// 将 `run()` 标记为 Tauri 移动端入口点；桌面端由 `main.rs` 直接调用。
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// 1. 注册插件（日志、对话框、Opener）
/// 2. 在 `setup` 钩子中加载配置、组装 `Studio` 并注册为 managed state
/// 3. 注册所有自定义 Tauri commands
/// 4. 生成应用上下文并启动主事件循环
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如配置文件缺失或窗口创建失败），
/// 将通过 `.expect()` 触发 panic 并输出错误信息。
pub fn run() {
    let log_level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    tauri::Builder::default()
        // 日志插件最先注册，setup 阶段的日志也能输出
        .plugin(tauri_plugin_log::Builder::default().level(log_level).build())
        // 对话框插件：阻塞式提示和部署确认
        .plugin(tauri_plugin_dialog::init())
        // Opener 插件：在系统文件管理器中定位下载的归档
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let bridge = Arc::new(WebviewBridge::new(app.handle().clone()));
            let studio = tauri::async_runtime::block_on(assemble_studio(bridge.clone()))?;
            app.manage(bridge);
            app.manage(studio);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // 工作流 commands
            commands::workflows::generate_project,
            commands::workflows::add_feature,
            commands::workflows::download_project,
            commands::workflows::deploy_project,
            commands::workflows::answer_prompt,
            // 项目 commands
            commands::projects::current_project,
            commands::projects::list_projects,
            commands::projects::check_backend,
            commands::projects::reveal_archive,
            // 设置 commands
            commands::settings::read_theme,
            commands::settings::toggle_theme,
            commands::settings::read_client_config,
            commands::settings::save_client_config,
            commands::settings::active_client_config,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// 加载配置并组装编排根对象
///
/// 无法确定数据目录时使用默认配置和仅内存存储（项目标识不跨会话保存）。
#[cfg(feature = "desktop")]
async fn assemble_studio(bridge: Arc<WebviewBridge>) -> Result<Studio, String> {
    let data_dir = utils::path::get_app_data_path();

    let store: Arc<dyn KeyValueStore> = match &data_dir {
        Ok(dir) => Arc::new(JsonFileStore::new(dir.join(STORAGE_FILE_NAME))),
        Err(e) => {
            log::warn!("{}，项目标识和主题只在本次会话内有效", e);
            Arc::new(MemoryStore::new())
        }
    };
    let client_config = match &data_dir {
        Ok(dir) => config::load_effective_config(dir).await,
        Err(_) => config::apply_overrides(
            ClientConfig::default(),
            std::env::var(config::API_URL_ENV).ok(),
        ),
    };

    let api = HttpGeneratorApi::new(&client_config.api_url)
        .map_err(|e| format!("生成服务地址无效 ({}): {}", client_config.api_url, e))?;
    let archives = DirectorySink::downloads()?;

    log::info!(
        "生成服务: {}，部署目标: {}",
        client_config.api_url,
        client_config.deploy_target
    );

    Ok(Studio::assemble(StudioParts {
        config: client_config,
        api: Arc::new(api),
        store,
        render_surface: bridge.clone(),
        control_surface: bridge.clone(),
        notice_sink: bridge.clone(),
        prompter: bridge,
        archives: Arc::new(archives),
    })
    .await)
}
