//! # 项目请求与响应数据模型
//!
//! 定义了与生成服务通信的请求体、统一响应信封，以及前端提交的生成表单。
//!
//! 这些结构体通过 `serde` 的 Serialize/Deserialize 特征实现：
//! - HTTP JSON 请求/响应体（camelCase 字段名，与生成服务保持一致）
//! - Tauri IPC 序列化（JS → Rust）：前端表单直接反序列化为 `GenerateInput`

use serde::{Deserialize, Serialize};

use crate::models::artifact::CodeArtifact;

/// 前端生成表单
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface GenerateInput {
///   projectName?: string;
///   projectType: string;
///   description: string;
///   techStack: string[];
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInput {
    /// 项目名称：为空时使用配置中的默认名称
    #[serde(default)]
    pub project_name: Option<String>,

    /// 项目类型（如 "ecommerce"、"portfolio"）
    #[serde(default)]
    pub project_type: String,

    /// 自由文本描述：去除首尾空白后不得为空
    #[serde(default)]
    pub description: String,

    /// 勾选的技术栈
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

/// `POST /api/generate` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub project_name: String,
    pub project_type: String,
    pub description: String,
    pub tech_stack: Vec<String>,
}

/// `POST /api/add-feature` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    pub project_name: String,
    pub feature_description: String,
}

/// `POST /api/deploy` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    pub project_name: String,
}

/// 生成服务的统一响应信封
///
/// 四个业务接口以及项目列表接口都返回此结构，`success` 字段是必需的；
/// 缺少 `success` 的响应体视为格式错误。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope {
    /// 响应级成功标志：只有传输成功且此字段为 true 时操作才算成功
    pub success: bool,

    /// 代码产物（生成、添加功能、读取项目接口）
    #[serde(default)]
    pub code: Option<CodeArtifact>,

    /// 失败原因：存在时原样展示给用户
    #[serde(default)]
    pub error: Option<String>,

    /// 附加说明（部署接口成功时返回）
    #[serde(default)]
    pub message: Option<String>,

    /// 已保存项目名称列表（`GET /api/projects`）
    #[serde(default)]
    pub projects: Option<Vec<String>>,
}

/// 部署回执
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployReceipt {
    /// 服务端的说明文本（可选）
    pub message: Option<String>,
}

/// `GET /api/health` 响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub engine: Option<String>,
}
