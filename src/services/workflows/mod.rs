//! # 工作流
//!
//! 四个由按钮触发的异步操作，共享同一个当前项目标识：
//! - `generate` - 生成新项目（失败时渲染本地回退产物）
//! - `feature` - 为当前项目添加功能（失败时保留原有渲染）
//! - `download` - 读取服务端保存的项目并打包为 ZIP
//! - `deploy` - 确认后请求服务端复制到部署目标
//!
//! 每个工作流都是一个返回完成信号（`WorkflowOutcome`）的 async 函数，
//! 不会把错误抛出自身边界：校验拒绝、用户取消、重复触发和失败都体现在返回值中。
//! 界面层订阅返回值（桌面端作为 command 的返回值传回 WebView）。

pub mod deploy;
pub mod download;
pub mod feature;
pub mod generate;

use serde::Serialize;

use crate::services::error::WorkflowError;

/// 工作流的完成信号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome<T> {
    /// 成功完成
    Completed(T),
    /// 发起网络请求之前被拒绝（校验失败或缺少项目）
    Refused(String),
    /// 用户取消（拒绝确认、关闭输入框或输入为空）
    Cancelled,
    /// 同一按钮已有请求在进行
    Busy,
    /// 远程调用或本地处理失败
    Failed(WorkflowError),
}

impl<T> WorkflowOutcome<T> {
    #[cfg(test)]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// 转换为可序列化的报告，`describe` 把成功值转换为可选的说明文本
    pub fn into_report(self, describe: impl FnOnce(T) -> Option<String>) -> WorkflowReport {
        let (status, detail) = match self {
            Self::Completed(value) => (WorkflowStatus::Completed, describe(value)),
            Self::Refused(reason) => (WorkflowStatus::Refused, Some(reason)),
            Self::Cancelled => (WorkflowStatus::Cancelled, None),
            Self::Busy => (WorkflowStatus::Busy, None),
            Self::Failed(error) => (WorkflowStatus::Failed, Some(error.to_string())),
        };
        WorkflowReport { status, detail }
    }
}

/// 报告中的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowStatus {
    Completed,
    Refused,
    Cancelled,
    Busy,
    Failed,
}

/// 返回给 WebView 的工作流报告
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface WorkflowReport {
///   status: 'completed' | 'refused' | 'cancelled' | 'busy' | 'failed';
///   detail: string | null;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowReport {
    pub status: WorkflowStatus,
    pub detail: Option<String>,
}
