//! # 添加功能工作流
//!
//! 在当前项目上增量添加功能：
//! 1. 没有当前项目时阻塞提示并返回，不发起请求
//! 2. 输入框收集功能描述；取消或只有空白时静默返回
//! 3. 获取添加功能按钮闸门
//! 4. 请求 `POST /api/add-feature`
//! 5. 成功：原地替换代码面板和预览（不改变输出面板可见性、不滚动），成功通知
//!    失败：已有渲染保持不变（不使用回退产物），错误通知
//!
//! 项目标识在整个过程中只读。

use crate::models::artifact::CodeArtifact;
use crate::models::project::FeatureRequest;
use crate::services::gate::Control;
use crate::services::renderer::OutputReveal;
use crate::services::studio::Studio;
use crate::services::workflows::WorkflowOutcome;

/// 没有当前项目时的阻塞提示
pub const NO_PROJECT: &str = "Generate a project first!";

/// 功能描述输入框的提示文字
pub const FEATURE_PROMPT: &str =
    "Describe the feature to add (e.g., 'Add contact form with email validation'):";

/// 添加成功通知
pub const FEATURE_ADDED: &str = "✨ Feature added successfully!";

/// 添加失败通知
pub const FEATURE_FAILED: &str = "⚠️ Failed to add feature";

/// 为当前项目添加功能
pub async fn add_feature(studio: &Studio) -> WorkflowOutcome<CodeArtifact> {
    if studio.project.current().is_none() {
        studio.prompter.alert(NO_PROJECT).await;
        return WorkflowOutcome::Refused(NO_PROJECT.to_string());
    }

    let Some(feature_description) = studio
        .prompter
        .prompt(FEATURE_PROMPT)
        .await
        .filter(|text| !text.trim().is_empty())
    else {
        return WorkflowOutcome::Cancelled;
    };

    let Some(_busy) = studio.gate(Control::AddFeature).acquire() else {
        log::info!("添加功能请求正在进行，忽略重复触发");
        return WorkflowOutcome::Busy;
    };

    // 等待之前的生成完成后再读取项目标识，功能总是加到最新生成的项目上
    let _sequence = studio.project.exclusive().await;
    let Some(project_name) = studio.project.current() else {
        return WorkflowOutcome::Refused(NO_PROJECT.to_string());
    };

    log::info!("开始为项目 {} 添加功能", project_name);
    let request = FeatureRequest {
        project_name,
        feature_description,
    };

    match studio.api.add_feature(&request).await {
        Ok(artifact) => {
            studio.renderer.render(&artifact, OutputReveal::Keep);
            studio.notices.success(FEATURE_ADDED);
            WorkflowOutcome::Completed(artifact)
        }
        Err(e) => {
            log::error!("为项目 {} 添加功能失败: {}", request.project_name, e);
            studio.notices.error(FEATURE_FAILED);
            WorkflowOutcome::Failed(e.into())
        }
    }
}
