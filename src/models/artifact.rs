//! # 代码产物数据模型
//!
//! 定义了生成服务返回的四段式代码产物（CodeArtifact），以及生成失败时
//! 使用的本地静态回退产物和生成中的占位预览文档。
//!
//! 线上 JSON 字段名为 `html` / `css` / `js` / `backend`，
//! Rust 端使用语义化的字段名 `markup` / `style` / `script` / `backend`。

use serde::{Deserialize, Serialize};

/// 生成进行中时预览区显示的占位文档
///
/// 在网络请求返回之前立即写入预览区（乐观 UI），请求结束后被真实产物或回退产物替换。
pub const GENERATING_PLACEHOLDER: &str = r#"<div style="display:flex;align-items:center;justify-content:center;height:100%;color:#888">
      Generating your website...
    </div>"#;

/// 生成失败时渲染的回退页面
pub const FALLBACK_MARKUP: &str = r#"<html><body style="font-family:sans-serif">
      <h1>Template Loaded</h1>
      <p>Backend not available.</p>
    </body></html>"#;

/// 四段式代码产物
///
/// 由远程生成服务产生，或由本地回退逻辑构造。一旦收到即不可变，
/// 每个新产物都会完整替换渲染器中的旧产物（不做合并）。
///
/// 任一字段缺失时反序列化为空字符串，而不是报错。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface GeneratedCode {
///   html: string;
///   css: string;
///   js: string;
///   backend: string;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArtifact {
    /// 页面标记（HTML），同时作为实时预览文档
    #[serde(rename = "html", default, deserialize_with = "nullable_text")]
    pub markup: String,

    /// 样式表（CSS）
    #[serde(rename = "css", default, deserialize_with = "nullable_text")]
    pub style: String,

    /// 前端脚本（JavaScript）
    #[serde(rename = "js", default, deserialize_with = "nullable_text")]
    pub script: String,

    /// 后端源码（Python）
    #[serde(default, deserialize_with = "nullable_text")]
    pub backend: String,
}

impl CodeArtifact {
    /// 构造一个完整的产物
    pub fn new(
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
        backend: impl Into<String>,
    ) -> Self {
        Self {
            markup: markup.into(),
            style: style.into(),
            script: script.into(),
            backend: backend.into(),
        }
    }

    /// 生成失败时使用的固定回退产物：占位页面 + 空的样式/脚本/后端
    pub fn fallback() -> Self {
        Self::new(FALLBACK_MARKUP, "", "", "")
    }
}

/// 将 JSON `null` 视为空字符串
fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
