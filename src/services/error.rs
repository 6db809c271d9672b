//! # 错误分类
//!
//! 远程接口失败（`ApiError`）和工作流失败（`WorkflowError`）。
//!
//! 传输错误、非 2xx 状态、`success=false`、响应体格式错误在工作流层面一律视为失败，
//! 这里保留细分类型只为生成准确的用户可见原因和日志。

use thiserror::Error;

/// 远程生成服务调用失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 配置的基地址无法解析
    #[error("invalid API base URL `{0}`")]
    InvalidBaseUrl(String),

    /// 连接失败、请求发送失败或响应体读取失败
    #[error("transport error: {0}")]
    Transport(String),

    /// 非 2xx 状态码；`error` 为响应体中的错误说明（如果能解析）
    #[error("backend responded with status {status}")]
    Status { status: u16, error: Option<String> },

    /// 2xx 但 `success=false`
    #[error("backend rejected the request: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// 响应体不是预期的 JSON 结构
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// 服务端给出的错误说明（`error` 字段），原样返回
    pub fn backend_reason(&self) -> Option<&str> {
        match self {
            Self::Status { error, .. } | Self::Rejected(error) => error.as_deref(),
            _ => None,
        }
    }

    /// 面向用户的失败原因
    ///
    /// 服务端给出 `error` 时原样使用；状态码失败且没有说明时使用 `fallback_status`
    /// 生成的文案；其余情况使用错误本身的描述。
    pub fn reason_or(&self, fallback_status: impl FnOnce(u16) -> String) -> String {
        if let Some(reason) = self.backend_reason() {
            return reason.to_string();
        }
        match self {
            Self::Status { status, .. } => fallback_status(*status),
            Self::Transport(detail) | Self::Malformed(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// 工作流执行失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// ZIP 打包失败
    #[error("failed to build archive: {0}")]
    Archive(String),

    /// 归档保存失败
    #[error("failed to save archive: {0}")]
    Save(String),
}
