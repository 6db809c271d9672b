//! # 下载工作流
//!
//! 读取服务端为当前项目保存的规范产物（`GET /api/projects/{name}`，只读，不触发重新生成），
//! 打包为固定四个成员的 ZIP，并以 `<项目名>.zip` 保存到本地。
//!
//! 没有当前项目时给出错误通知（不是阻塞提示）。任一步骤失败都只给出错误通知，
//! 不会产生不完整的归档。

use crate::services::archive::{self, SavedArchive};
use crate::services::error::WorkflowError;
use crate::services::gate::Control;
use crate::services::studio::Studio;
use crate::services::workflows::WorkflowOutcome;

/// 没有当前项目时的错误通知
pub const NO_PROJECT_TO_DOWNLOAD: &str = "⚠️ Generate a project before downloading.";

/// 下载成功通知
pub const DOWNLOADED: &str = "📥 Project ZIP downloaded.";

/// 下载失败通知
pub const DOWNLOAD_FAILED: &str = "⚠️ Failed to download project";

/// 下载当前项目
pub async fn download(studio: &Studio) -> WorkflowOutcome<SavedArchive> {
    let Some(project_name) = studio.project.current() else {
        studio.notices.error(NO_PROJECT_TO_DOWNLOAD);
        return WorkflowOutcome::Refused(NO_PROJECT_TO_DOWNLOAD.to_string());
    };

    let Some(_busy) = studio.gate(Control::Download).acquire() else {
        log::info!("下载请求正在进行，忽略重复触发");
        return WorkflowOutcome::Busy;
    };

    log::info!("开始下载项目: {}", project_name);
    match fetch_and_save(studio, &project_name).await {
        Ok(saved) => {
            log::info!("项目归档已保存: {}", saved.location.display());
            studio.notices.success(DOWNLOADED);
            WorkflowOutcome::Completed(saved)
        }
        Err(e) => {
            log::error!("下载项目 {} 失败: {}", project_name, e);
            studio.notices.error(DOWNLOAD_FAILED);
            WorkflowOutcome::Failed(e)
        }
    }
}

/// 读取规范产物 → 打包 → 保存
async fn fetch_and_save(studio: &Studio, project_name: &str) -> Result<SavedArchive, WorkflowError> {
    let artifact = studio.api.fetch_project(project_name).await?;
    let bytes = archive::pack(&artifact).map_err(WorkflowError::Archive)?;
    studio
        .archives
        .save(&format!("{}.zip", project_name), &bytes)
        .await
        .map_err(WorkflowError::Save)
}
