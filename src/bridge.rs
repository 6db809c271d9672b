//! # WebView 桥接
//!
//! 把编排核心的各个呈现端接到 Tauri 上：
//! - 渲染帧、按钮外观、通知显示/消失通过事件推送给 WebView
//! - 阻塞提示和确认使用原生对话框（`tauri-plugin-dialog`）
//! - 文本输入没有原生对话框，改为向 WebView 发送 `prompt:request` 事件，
//!   由前端弹出输入框后通过 `answer_prompt` command 回传结果
//!
//! ## 事件列表
//! | 事件 | 负载 |
//! |------|------|
//! | `render:frame` | `RenderFrame` |
//! | `control:state` | `{ control, enabled, label, loading }` |
//! | `notice:show` | `Notice` |
//! | `notice:dismiss` | 通知编号 |
//! | `prompt:request` | `{ id, message }` |

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tokio::sync::oneshot;

use crate::services::gate::{Control, ControlAppearance, ControlSurface};
use crate::services::notify::{Notice, NoticeSink};
use crate::services::prompt::Prompter;
use crate::services::renderer::{RenderFrame, RenderSurface};

pub const EVENT_RENDER_FRAME: &str = "render:frame";
pub const EVENT_CONTROL_STATE: &str = "control:state";
pub const EVENT_NOTICE_SHOW: &str = "notice:show";
pub const EVENT_NOTICE_DISMISS: &str = "notice:dismiss";
pub const EVENT_PROMPT_REQUEST: &str = "prompt:request";

/// 对话框标题
const DIALOG_TITLE: &str = "NovaForge";

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlEvent<'a> {
    control: Control,
    #[serde(flatten)]
    appearance: &'a ControlAppearance,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptRequest<'a> {
    id: u64,
    message: &'a str,
}

/// Tauri 端的呈现与交互实现
pub struct WebviewBridge {
    app: AppHandle,
    /// 等待 WebView 回答的文本输入：编号 → 应答通道
    pending_prompts: Mutex<HashMap<u64, oneshot::Sender<Option<String>>>>,
    next_prompt_id: AtomicU64,
}

impl WebviewBridge {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            pending_prompts: Mutex::new(HashMap::new()),
            next_prompt_id: AtomicU64::new(1),
        }
    }

    /// 投递 WebView 对文本输入的回答
    ///
    /// # 返回值
    /// 编号对应的输入仍在等待时返回 true
    pub fn answer_prompt(&self, id: u64, value: Option<String>) -> bool {
        let sender = self
            .pending_prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);

        match sender {
            Some(sender) => sender.send(value).is_ok(),
            None => false,
        }
    }

    /// 发送事件，失败时只记录日志（界面已关闭时不影响工作流）
    fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(e) = self.app.emit(event, payload) {
            log::warn!("发送事件 {} 失败: {}", event, e);
        }
    }

    /// 显示原生消息框并等待关闭
    async fn show_dialog(
        &self,
        message: &str,
        kind: MessageDialogKind,
        buttons: MessageDialogButtons,
    ) -> bool {
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .message(message)
            .title(DIALOG_TITLE)
            .kind(kind)
            .buttons(buttons)
            .show(move |accepted| {
                let _ = tx.send(accepted);
            });
        rx.await.unwrap_or(false)
    }
}

impl RenderSurface for WebviewBridge {
    fn present(&self, frame: &RenderFrame) {
        self.emit(EVENT_RENDER_FRAME, frame);
    }
}

impl ControlSurface for WebviewBridge {
    fn update(&self, control: Control, appearance: &ControlAppearance) {
        self.emit(EVENT_CONTROL_STATE, ControlEvent { control, appearance });
    }
}

impl NoticeSink for WebviewBridge {
    fn show(&self, notice: &Notice) {
        self.emit(EVENT_NOTICE_SHOW, notice);
    }

    fn dismiss(&self, id: u64) {
        self.emit(EVENT_NOTICE_DISMISS, id);
    }
}

#[async_trait]
impl Prompter for WebviewBridge {
    async fn alert(&self, message: &str) {
        self.show_dialog(message, MessageDialogKind::Warning, MessageDialogButtons::Ok)
            .await;
    }

    async fn confirm(&self, message: &str) -> bool {
        self.show_dialog(message, MessageDialogKind::Info, MessageDialogButtons::OkCancel)
            .await
    }

    async fn prompt(&self, message: &str) -> Option<String> {
        let id = self.next_prompt_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.pending_prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);

        if let Err(e) = self.app.emit(EVENT_PROMPT_REQUEST, PromptRequest { id, message }) {
            log::warn!("发送输入请求失败: {}", e);
            self.pending_prompts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);
            return None;
        }

        // WebView 关闭或重新加载时发送端被丢弃，按取消处理
        rx.await.ok().flatten()
    }
}
