//! # 部署工作流
//!
//! 请求服务端把当前项目复制到部署目标：
//! 1. 没有当前项目时阻塞提示并返回
//! 2. 显式确认（提示中包含项目名称和部署目标），拒绝时无任何副作用
//! 3. 获取部署按钮闸门（文字替换为进行中，原文字在结束后还原）
//! 4. 请求 `POST /api/deploy`
//! 5. 成功通知包含项目名称；失败通知包含失败原因（服务端给出时原样展示）
//!
//! 部署的是用户确认时看到的那个项目。

use crate::models::project::{DeployReceipt, DeployRequest};
use crate::services::gate::Control;
use crate::services::studio::Studio;
use crate::services::workflows::WorkflowOutcome;

/// 没有当前项目时的阻塞提示
pub const NO_PROJECT_TO_DEPLOY: &str = "Generate a project first before deploying!";

/// 部署确认提示
pub fn confirmation_message(project_name: &str, target: &str) -> String {
    format!("Copy \"{}\" into {}?", project_name, target)
}

/// 部署成功通知
pub fn deployed_message(project_name: &str, target: &str) -> String {
    format!("✅ Copied to {}: {}", target, project_name)
}

/// 部署失败通知
pub fn deploy_failed_message(reason: &str) -> String {
    format!("⚠️ Failed to copy project: {}", reason)
}

/// 部署当前项目
pub async fn deploy(studio: &Studio) -> WorkflowOutcome<DeployReceipt> {
    let Some(project_name) = studio.project.current() else {
        studio.prompter.alert(NO_PROJECT_TO_DEPLOY).await;
        return WorkflowOutcome::Refused(NO_PROJECT_TO_DEPLOY.to_string());
    };

    let target = &studio.config.deploy_target;
    if !studio
        .prompter
        .confirm(&confirmation_message(&project_name, target))
        .await
    {
        return WorkflowOutcome::Cancelled;
    }

    let Some(_busy) = studio.gate(Control::Deploy).acquire() else {
        log::info!("部署请求正在进行，忽略重复触发");
        return WorkflowOutcome::Busy;
    };

    let _sequence = studio.project.exclusive().await;
    log::info!("开始部署项目 {} 到 {}", project_name, target);

    let request = DeployRequest {
        project_name: project_name.clone(),
    };
    match studio.api.deploy(&request).await {
        Ok(receipt) => {
            if let Some(message) = &receipt.message {
                log::info!("部署完成: {}", message);
            }
            studio
                .notices
                .success(deployed_message(&project_name, target));
            WorkflowOutcome::Completed(receipt)
        }
        Err(e) => {
            log::error!("部署项目 {} 失败: {}", project_name, e);
            let reason = e.reason_or(|status| format!("Deploy failed with status {}", status));
            studio.notices.error(deploy_failed_message(&reason));
            WorkflowOutcome::Failed(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::error::ApiError;
    use crate::services::notify::NoticeKind;
    use crate::testing::{ApiCall, Harness};

    #[tokio::test]
    async fn test_declined_confirmation_has_no_side_effects() {
        let h = Harness::new(Some("Shop")).await;
        h.prompter.answer_confirm(false);
        let before = h.studio.gate(Control::Deploy).appearance();

        let outcome = deploy(&h.studio).await;

        assert_eq!(outcome, WorkflowOutcome::Cancelled);
        assert_eq!(
            h.prompter.confirms(),
            vec!["Copy \"Shop\" into deploy_target?".to_string()]
        );
        assert!(h.api.calls().is_empty());
        assert!(h.surface.notices().is_empty());
        assert!(h.surface.control_updates(Control::Deploy).is_empty());
        assert_eq!(h.studio.gate(Control::Deploy).appearance(), before);
        assert!(before.enabled);
    }

    #[tokio::test]
    async fn test_without_project_alerts_and_skips_confirmation() {
        let h = Harness::new(None).await;
        h.prompter.answer_confirm(true);

        let outcome = deploy(&h.studio).await;

        assert!(matches!(outcome, WorkflowOutcome::Refused(_)));
        assert_eq!(h.prompter.alerts(), vec![NO_PROJECT_TO_DEPLOY.to_string()]);
        assert!(h.prompter.confirms().is_empty());
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_names_project_and_restores_label() {
        let h = Harness::new(Some("Shop")).await;
        h.prompter.answer_confirm(true);
        h.api.reply_deploy(Ok(DeployReceipt {
            message: Some("Project 'Shop' copied to deploy_target.".into()),
        }));

        let outcome = deploy(&h.studio).await;

        assert!(matches!(outcome, WorkflowOutcome::Completed(_)));
        assert_eq!(
            h.api.calls(),
            vec![ApiCall::Deploy(DeployRequest {
                project_name: "Shop".into()
            })]
        );
        let notice = &h.surface.notices()[0];
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "✅ Copied to deploy_target: Shop");

        let updates = h.surface.control_updates(Control::Deploy);
        // acquire + release
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].label, "📦 Copying...");
        assert!(!updates[0].enabled);
        assert_eq!(updates[1].label, Control::Deploy.idle_label());
        assert!(updates[1].enabled);
    }

    #[tokio::test]
    async fn test_failure_surfaces_backend_reason() {
        let h = Harness::new(Some("Shop")).await;
        h.prompter.answer_confirm(true);
        h.api.reply_deploy(Err(ApiError::Status {
            status: 400,
            error: Some("Project folder not found for 'Shop'. Generate code first.".into()),
        }));

        deploy(&h.studio).await;

        let notice = &h.surface.notices()[0];
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(
            notice.message,
            "⚠️ Failed to copy project: Project folder not found for 'Shop'. Generate code first."
        );
        assert!(h.studio.gate(Control::Deploy).appearance().enabled);
    }

    #[tokio::test]
    async fn test_failure_without_reason_uses_status() {
        let h = Harness::new(Some("Shop")).await;
        h.prompter.answer_confirm(true);
        h.api.reply_deploy(Err(ApiError::Status {
            status: 503,
            error: None,
        }));

        deploy(&h.studio).await;

        assert_eq!(
            h.surface.notices()[0].message,
            "⚠️ Failed to copy project: Deploy failed with status 503"
        );
    }
}
