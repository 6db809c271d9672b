//! # 编排根对象
//!
//! `Studio` 把四个工作流共享的组件组装在一起：
//! - 远程接口（`GeneratorApi`）
//! - 当前项目状态（`ProjectState`）
//! - 产物渲染器、通知通道、四个按钮的请求闸门
//! - 阻塞式交互（`Prompter`）和归档保存端（`ArchiveSink`）
//!
//! 桌面端把它注册为 Tauri managed state，所有 command 通过 `State<Studio>` 访问；
//! 测试中用替身实现组装。

use std::sync::Arc;

use crate::models::settings::{ClientConfig, ThemePreference};
use crate::services::api::GeneratorApi;
use crate::services::archive::ArchiveSink;
use crate::services::gate::{Control, ControlSurface, RequestGate};
use crate::services::notify::{NoticeSink, NotificationChannel};
use crate::services::preferences;
use crate::services::project_state::ProjectState;
use crate::services::prompt::Prompter;
use crate::services::renderer::{ArtifactRenderer, RenderSurface};
use crate::services::store::KeyValueStore;

/// 组装 `Studio` 所需的全部部件
pub struct StudioParts {
    pub config: ClientConfig,
    pub api: Arc<dyn GeneratorApi>,
    pub store: Arc<dyn KeyValueStore>,
    pub render_surface: Arc<dyn RenderSurface>,
    pub control_surface: Arc<dyn ControlSurface>,
    pub notice_sink: Arc<dyn NoticeSink>,
    pub prompter: Arc<dyn Prompter>,
    pub archives: Arc<dyn ArchiveSink>,
}

/// 每个按钮一个闸门，互相独立
struct Gates {
    generate: RequestGate,
    add_feature: RequestGate,
    download: RequestGate,
    deploy: RequestGate,
}

/// 工作流编排根对象
pub struct Studio {
    pub(crate) config: ClientConfig,
    pub(crate) api: Arc<dyn GeneratorApi>,
    pub(crate) project: ProjectState,
    pub(crate) renderer: ArtifactRenderer,
    pub(crate) notices: NotificationChannel,
    pub(crate) prompter: Arc<dyn Prompter>,
    pub(crate) archives: Arc<dyn ArchiveSink>,
    store: Arc<dyn KeyValueStore>,
    gates: Gates,
}

impl Studio {
    /// 组装并从持久化存储恢复上次的项目
    pub async fn assemble(parts: StudioParts) -> Self {
        let project = ProjectState::load(parts.store.clone()).await;
        let surface = parts.control_surface;

        Self {
            config: parts.config,
            api: parts.api,
            project,
            renderer: ArtifactRenderer::new(parts.render_surface),
            notices: NotificationChannel::new(parts.notice_sink),
            prompter: parts.prompter,
            archives: parts.archives,
            store: parts.store,
            gates: Gates {
                generate: RequestGate::new(Control::Generate, surface.clone()),
                add_feature: RequestGate::new(Control::AddFeature, surface.clone()),
                download: RequestGate::new(Control::Download, surface.clone()),
                deploy: RequestGate::new(Control::Deploy, surface),
            },
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &dyn GeneratorApi {
        self.api.as_ref()
    }

    pub fn project(&self) -> &ProjectState {
        &self.project
    }

    pub fn renderer(&self) -> &ArtifactRenderer {
        &self.renderer
    }

    pub fn notices(&self) -> &NotificationChannel {
        &self.notices
    }

    /// 指定按钮的闸门
    pub fn gate(&self, control: Control) -> &RequestGate {
        match control {
            Control::Generate => &self.gates.generate,
            Control::AddFeature => &self.gates.add_feature,
            Control::Download => &self.gates.download,
            Control::Deploy => &self.gates.deploy,
        }
    }

    /// 当前生效的主题
    pub async fn theme(&self, system_prefers_dark: bool) -> ThemePreference {
        preferences::read_theme(self.store.as_ref(), system_prefers_dark).await
    }

    /// 切换主题并持久化
    pub async fn toggle_theme(&self, system_prefers_dark: bool) -> Result<ThemePreference, String> {
        preferences::toggle_theme(self.store.as_ref(), system_prefers_dark).await
    }
}
