//! 单元测试用的替身实现：记录型呈现端、脚本化交互、脚本化远程接口、内存归档保存端。

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::models::artifact::CodeArtifact;
use crate::models::project::{
    DeployReceipt, DeployRequest, FeatureRequest, GenerateRequest, HealthStatus,
};
use crate::services::api::GeneratorApi;
use crate::services::archive::{ArchiveSink, SavedArchive};
use crate::services::error::ApiError;
use crate::services::gate::{Control, ControlAppearance, ControlSurface};
use crate::services::notify::{Notice, NoticeSink};
use crate::services::prompt::Prompter;
use crate::services::renderer::{RenderFrame, RenderSurface};
use crate::services::store::MemoryStore;
use crate::services::studio::{Studio, StudioParts};

/// 记录所有推送到界面的内容
#[derive(Default)]
pub struct RecordingSurface {
    frames: Mutex<Vec<RenderFrame>>,
    controls: Mutex<Vec<(Control, ControlAppearance)>>,
    notices: Mutex<Vec<Notice>>,
    dismissed: Mutex<Vec<u64>>,
}

impl RecordingSurface {
    pub fn frames(&self) -> Vec<RenderFrame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn control_updates(&self, control: Control) -> Vec<ControlAppearance> {
        self.controls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == control)
            .map(|(_, appearance)| appearance.clone())
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn dismissed(&self) -> Vec<u64> {
        self.dismissed.lock().unwrap().clone()
    }
}

impl RenderSurface for RecordingSurface {
    fn present(&self, frame: &RenderFrame) {
        self.frames.lock().unwrap().push(frame.clone());
    }
}

impl ControlSurface for RecordingSurface {
    fn update(&self, control: Control, appearance: &ControlAppearance) {
        self.controls
            .lock()
            .unwrap()
            .push((control, appearance.clone()));
    }
}

impl NoticeSink for RecordingSurface {
    fn show(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn dismiss(&self, id: u64) {
        self.dismissed.lock().unwrap().push(id);
    }
}

/// 预先设定答案的交互实现
#[derive(Default)]
pub struct ScriptedPrompter {
    confirm_answer: Mutex<bool>,
    prompt_answer: Mutex<Option<String>>,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answer_confirm(&self, answer: bool) {
        *self.confirm_answer.lock().unwrap() = answer;
    }

    pub fn answer_prompt(&self, answer: Option<&str>) {
        *self.prompt_answer.lock().unwrap() = answer.map(str::to_string);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        *self.confirm_answer.lock().unwrap()
    }

    async fn prompt(&self, message: &str) -> Option<String> {
        self.prompts.lock().unwrap().push(message.to_string());
        self.prompt_answer.lock().unwrap().clone()
    }
}

/// 远程接口收到的调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Generate(GenerateRequest),
    AddFeature(FeatureRequest),
    FetchProject(String),
    Deploy(DeployRequest),
    ListProjects,
    Health,
}

/// 脚本化的远程接口：按设定返回结果，并记录所有调用
pub struct FakeApi {
    calls: Mutex<Vec<ApiCall>>,
    artifact_reply: Mutex<Result<CodeArtifact, ApiError>>,
    deploy_reply: Mutex<Result<DeployReceipt, ApiError>>,
    generate_hold: Mutex<Option<Arc<Notify>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            artifact_reply: Mutex::new(Err(ApiError::Transport("unscripted".into()))),
            deploy_reply: Mutex::new(Ok(DeployReceipt::default())),
            generate_hold: Mutex::new(None),
        }
    }
}

impl FakeApi {
    pub fn reply_artifact(&self, reply: Result<CodeArtifact, ApiError>) {
        *self.artifact_reply.lock().unwrap() = reply;
    }

    pub fn reply_deploy(&self, reply: Result<DeployReceipt, ApiError>) {
        *self.deploy_reply.lock().unwrap() = reply;
    }

    /// 之后的 `generate` 调用在记录后挂起，直到返回的 `Notify` 放行
    pub fn hold_generate(&self) -> Arc<Notify> {
        let hold = Arc::new(Notify::new());
        *self.generate_hold.lock().unwrap() = Some(hold.clone());
        hold
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GeneratorApi for FakeApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<CodeArtifact, ApiError> {
        self.record(ApiCall::Generate(request.clone()));
        let hold = self.generate_hold.lock().unwrap().clone();
        if let Some(hold) = hold {
            hold.notified().await;
        }
        self.artifact_reply.lock().unwrap().clone()
    }

    async fn add_feature(&self, request: &FeatureRequest) -> Result<CodeArtifact, ApiError> {
        self.record(ApiCall::AddFeature(request.clone()));
        self.artifact_reply.lock().unwrap().clone()
    }

    async fn fetch_project(&self, project_name: &str) -> Result<CodeArtifact, ApiError> {
        self.record(ApiCall::FetchProject(project_name.to_string()));
        self.artifact_reply.lock().unwrap().clone()
    }

    async fn deploy(&self, request: &DeployRequest) -> Result<DeployReceipt, ApiError> {
        self.record(ApiCall::Deploy(request.clone()));
        self.deploy_reply.lock().unwrap().clone()
    }

    async fn list_projects(&self) -> Result<Vec<String>, ApiError> {
        self.record(ApiCall::ListProjects);
        Ok(vec![])
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record(ApiCall::Health);
        Ok(HealthStatus {
            status: "ok".into(),
            engine: Some("NovaForge".into()),
        })
    }
}

/// 内存中的归档保存端
#[derive(Default)]
pub struct MemorySink {
    saved: Mutex<HashMap<String, Vec<Vec<u8>>>>,
}

impl MemorySink {
    /// 指定文件名的所有保存记录（按保存顺序）
    pub fn saved(&self, file_name: &str) -> Vec<Vec<u8>> {
        self.saved
            .lock()
            .unwrap()
            .get(file_name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ArchiveSink for MemorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<SavedArchive, String> {
        self.saved
            .lock()
            .unwrap()
            .entry(file_name.to_string())
            .or_default()
            .push(bytes.to_vec());
        Ok(SavedArchive {
            file_name: file_name.to_string(),
            location: std::path::PathBuf::from("/memory").join(file_name),
            size: bytes.len(),
        })
    }
}

/// 组装好的测试工作台
pub struct Harness {
    pub studio: Studio,
    pub api: Arc<FakeApi>,
    pub surface: Arc<RecordingSurface>,
    pub prompter: Arc<ScriptedPrompter>,
    pub archives: Arc<MemorySink>,
    pub store: Arc<MemoryStore>,
}

impl Harness {
    /// 新工作台；`last_project` 模拟上次会话保存的项目
    pub async fn new(last_project: Option<&str>) -> Self {
        let store = Arc::new(MemoryStore::new());
        if let Some(name) = last_project {
            use crate::services::store::KeyValueStore;
            store
                .set(crate::services::project_state::LAST_PROJECT_KEY, name)
                .await
                .unwrap();
        }

        let api = Arc::new(FakeApi::default());
        let surface = Arc::new(RecordingSurface::default());
        let prompter = Arc::new(ScriptedPrompter::default());
        let archives = Arc::new(MemorySink::default());

        let studio = Studio::assemble(StudioParts {
            config: Default::default(),
            api: api.clone(),
            store: store.clone(),
            render_surface: surface.clone(),
            control_surface: surface.clone(),
            notice_sink: surface.clone(),
            prompter: prompter.clone(),
            archives: archives.clone(),
        })
        .await;

        Self {
            studio,
            api,
            surface,
            prompter,
            archives,
            store,
        }
    }

    /// 已持久化的项目标识
    pub async fn persisted_project(&self) -> Option<String> {
        use crate::services::store::KeyValueStore;
        self.store
            .get(crate::services::project_state::LAST_PROJECT_KEY)
            .await
            .unwrap()
    }
}
