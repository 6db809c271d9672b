//! # 阻塞式用户交互
//!
//! 工作流在发起网络请求前需要的三种交互：
//! - `alert` - 校验拒绝时的阻塞提示（如描述为空、尚未生成项目）
//! - `confirm` - 部署前的显式确认
//! - `prompt` - 添加功能时收集功能描述（取消返回 None）
//!
//! 桌面端使用原生对话框和 WebView 输入框实现，测试中使用脚本化实现。

use async_trait::async_trait;

#[async_trait]
pub trait Prompter: Send + Sync {
    /// 显示阻塞提示，用户关闭后返回
    async fn alert(&self, message: &str);

    /// 请求确认；用户同意返回 true
    async fn confirm(&self, message: &str) -> bool;

    /// 请求一段文本；用户取消返回 None
    async fn prompt(&self, message: &str) -> Option<String>;
}
