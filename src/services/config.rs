//! # 客户端配置读写
//!
//! 配置文件：`~/.novaforge/client-config.json`。
//! - 文件不存在时使用默认配置
//! - 环境变量 `NOVAFORGE_API_URL` 在加载时覆盖 `apiUrl`
//! - 保存后的配置在下次启动时生效

use std::path::Path;

use crate::models::settings::ClientConfig;

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "client-config.json";

/// 覆盖生成服务地址的环境变量
pub const API_URL_ENV: &str = "NOVAFORGE_API_URL";

/// 从数据目录读取配置文件
///
/// # 错误
/// 文件存在但无法读取或 JSON 解析失败时返回错误
pub async fn read_config(data_dir: &Path) -> Result<ClientConfig, String> {
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    // 配置文件不存在时返回默认配置
    if !config_path.exists() {
        return Ok(ClientConfig::default());
    }

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|e| format!("读取客户端配置文件失败: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("解析客户端配置文件失败: {}", e))
}

/// 保存配置文件（带缩进格式化），目录不存在时自动创建
pub async fn save_config(data_dir: &Path, config: &ClientConfig) -> Result<(), String> {
    if !data_dir.exists() {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| format!("创建数据目录失败: {}", e))?;
    }

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("序列化客户端配置失败: {}", e))?;

    tokio::fs::write(data_dir.join(CONFIG_FILE_NAME), content)
        .await
        .map_err(|e| format!("写入客户端配置文件失败: {}", e))
}

/// 启动时加载配置：读取失败记录警告并使用默认值，然后应用环境变量覆盖
pub async fn load_effective_config(data_dir: &Path) -> ClientConfig {
    let config = read_config(data_dir).await.unwrap_or_else(|e| {
        log::warn!("{}，使用默认配置", e);
        ClientConfig::default()
    });
    apply_overrides(config, std::env::var(API_URL_ENV).ok())
}

/// 应用环境变量覆盖（空值忽略）
pub fn apply_overrides(mut config: ClientConfig, api_url: Option<String>) -> ClientConfig {
    if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
        log::info!("使用环境变量 {} 指定的生成服务地址: {}", API_URL_ENV, url);
        config.api_url = url;
    }
    config
}
