//! # 生成工作流
//!
//! 执行顺序：
//! 1. 校验描述（去除首尾空白后不得为空），不通过时阻塞提示并返回，不发起请求
//! 2. 获取生成按钮闸门（禁用按钮、显示加载动画）
//! 3. 提交暂定帧："生成中"占位预览
//! 4. 请求 `POST /api/generate`
//! 5. 成功：渲染产物并显示输出面板、设置并持久化项目标识、成功通知
//!    失败：项目标识不变、错误通知、渲染固定的回退产物
//! 6. 闸门守卫释放，按钮恢复

use crate::models::artifact::CodeArtifact;
use crate::models::project::{GenerateInput, GenerateRequest};
use crate::services::gate::Control;
use crate::services::renderer::OutputReveal;
use crate::services::studio::Studio;
use crate::services::workflows::WorkflowOutcome;

/// 描述为空时的阻塞提示
pub const MISSING_DESCRIPTION: &str = "Please describe your project in detail!";

/// 生成成功通知
pub const GENERATED: &str = "✅ Website generated successfully";

/// 生成失败通知
pub const GENERATION_FAILED: &str = "⚠️ Backend error. Showing template.";

/// 生成新项目
pub async fn generate(studio: &Studio, input: GenerateInput) -> WorkflowOutcome<CodeArtifact> {
    if input.description.trim().is_empty() {
        studio.prompter.alert(MISSING_DESCRIPTION).await;
        return WorkflowOutcome::Refused(MISSING_DESCRIPTION.to_string());
    }

    let Some(_busy) = studio.gate(Control::Generate).acquire() else {
        log::info!("生成请求正在进行，忽略重复触发");
        return WorkflowOutcome::Busy;
    };

    let request = build_request(input, &studio.config.default_project_name);

    // 乐观 UI：在请求返回之前先给出反馈
    studio.renderer.show_pending();

    let _sequence = studio.project.exclusive().await;
    log::info!("开始生成项目: {}", request.project_name);

    match studio.api.generate(&request).await {
        Ok(artifact) => {
            studio
                .renderer
                .render(&artifact, OutputReveal::ShowAndScroll);

            if let Err(e) = studio.project.set(&request.project_name).await {
                log::warn!("保存项目标识失败（本次会话内仍然有效）: {}", e);
            }

            studio.notices.success(GENERATED);
            log::info!("项目生成完成: {}", request.project_name);
            WorkflowOutcome::Completed(artifact)
        }
        Err(e) => {
            log::error!("生成项目失败: {}", e);
            studio.notices.error(GENERATION_FAILED);
            studio
                .renderer
                .render(&CodeArtifact::fallback(), OutputReveal::Show);
            WorkflowOutcome::Failed(e.into())
        }
    }
}

/// 由表单构造请求体；项目名称为空（或只有空白）时使用默认名称
fn build_request(input: GenerateInput, default_name: &str) -> GenerateRequest {
    let project_name = input
        .project_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| default_name.to_string());

    GenerateRequest {
        project_name,
        project_type: input.project_type,
        description: input.description,
        tech_stack: input.tech_stack,
    }
}
