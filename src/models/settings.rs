//! # 客户端配置与偏好数据模型
//!
//! 定义了客户端配置（ClientConfig）和主题偏好（ThemePreference）。
//!
//! 对应前端 TypeScript 中的 `ClientConfig` 接口和 `'light' | 'dark'` 主题类型。

use serde::{Deserialize, Serialize};

/// 生成服务的默认地址
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// 部署目标的默认名称（服务端复制目标目录）
pub const DEFAULT_DEPLOY_TARGET: &str = "deploy_target";

/// 项目名称留空时使用的默认名称
pub const DEFAULT_PROJECT_NAME: &str = "My Website";

/// 客户端配置
///
/// 存储在 `~/.novaforge/client-config.json`。文件不存在时使用默认值，
/// 缺失的字段同样回落到默认值。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ClientConfig {
///   apiUrl: string;
///   deployTarget: string;
///   defaultProjectName: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// 生成服务基地址（如 `http://localhost:5000`）
    pub api_url: String,

    /// 部署目标名称：出现在确认对话框和成功通知中
    pub deploy_target: String,

    /// 项目名称留空时的默认名称
    pub default_project_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            deploy_target: DEFAULT_DEPLOY_TARGET.to_string(),
            default_project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

/// 主题偏好：二选一的显示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    /// 持久化使用的字符串值
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// 解析持久化的字符串值；未知值返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// 切换到另一种模式
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// 确定生效的主题：优先使用已保存的偏好，否则跟随系统
    pub fn resolve(stored: Option<&str>, system_prefers_dark: bool) -> Self {
        stored.and_then(Self::parse).unwrap_or(if system_prefers_dark {
            Self::Dark
        } else {
            Self::Light
        })
    }
}
