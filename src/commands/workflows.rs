//! # 工作流 Tauri Commands
//!
//! 前端按钮与四个工作流的对接：
//! - `generate_project` - 「生成网站」按钮，参数为表单内容
//! - `add_feature` - 「添加功能」按钮
//! - `download_project` - 「下载 ZIP」按钮
//! - `deploy_project` - 「部署」按钮
//! - `answer_prompt` - 回传文本输入框的结果
//!
//! 工作流本身不会失败到 command 边界之外：渲染帧、按钮外观和通知都通过事件推送，
//! command 只返回 `WorkflowReport` 作为完成信号。

use std::sync::Arc;

use tauri::State;

use crate::bridge::WebviewBridge;
use crate::models::project::GenerateInput;
use crate::services::studio::Studio;
use crate::services::workflows::{WorkflowReport, deploy, download, feature, generate};

/// 生成新项目
///
/// # 参数
/// - `input` - 表单内容（项目名称、类型、描述、技术栈）
#[tauri::command]
pub async fn generate_project(
    input: GenerateInput,
    studio: State<'_, Studio>,
) -> Result<WorkflowReport, String> {
    let outcome = generate::generate(studio.inner(), input).await;
    Ok(outcome.into_report(|_| None))
}

/// 为当前项目添加功能（功能描述通过 `prompt:request` 事件向前端索取）
#[tauri::command]
pub async fn add_feature(studio: State<'_, Studio>) -> Result<WorkflowReport, String> {
    let outcome = feature::add_feature(studio.inner()).await;
    Ok(outcome.into_report(|_| None))
}

/// 下载当前项目的 ZIP 归档
///
/// 成功时 `detail` 为归档的保存位置，前端可据此调用 `reveal_archive`。
#[tauri::command]
pub async fn download_project(studio: State<'_, Studio>) -> Result<WorkflowReport, String> {
    let outcome = download::download(studio.inner()).await;
    Ok(outcome.into_report(|saved| Some(saved.location.to_string_lossy().to_string())))
}

/// 部署当前项目（确认对话框在后端弹出）
///
/// 成功时 `detail` 为服务端返回的说明文字。
#[tauri::command]
pub async fn deploy_project(studio: State<'_, Studio>) -> Result<WorkflowReport, String> {
    let outcome = deploy::deploy(studio.inner()).await;
    Ok(outcome.into_report(|receipt| receipt.message))
}

/// 回传文本输入框的结果
///
/// # 参数
/// - `id` - `prompt:request` 事件携带的编号
/// - `value` - 输入内容；用户取消时为 `null`
///
/// # 错误
/// 编号不存在（已回答或已失效）时返回错误
#[tauri::command]
pub fn answer_prompt(
    id: u64,
    value: Option<String>,
    bridge: State<'_, Arc<WebviewBridge>>,
) -> Result<(), String> {
    if bridge.answer_prompt(id, value) {
        Ok(())
    } else {
        Err(format!("输入请求 {} 不存在或已结束", id))
    }
}
