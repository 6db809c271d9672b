//! # 产物渲染器
//!
//! 把四段式代码产物转换为代码面板和实时预览，并推送给呈现端：
//! - 每段源码按对应语言转义，包装为带 `language-*` 类名的代码块，
//!   由 WebView 中的高亮库进一步着色
//! - 页面标记原样作为预览文档
//!
//! ## 两阶段渲染
//! 生成开始时先提交一个**暂定帧**（只替换预览为占位文档，代码面板保持不变），
//! 请求结束后再提交**确认帧**（真实产物或回退产物）。渲染器自身保存最后一次提交的视图，
//! 因此这套逻辑不依赖任何界面即可测试。

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::models::artifact::{CodeArtifact, GENERATING_PLACEHOLDER};

/// 代码面板区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelRegion {
    Markup,
    Style,
    Script,
    Backend,
}

impl PanelRegion {
    pub const ALL: [PanelRegion; 4] = [Self::Markup, Self::Style, Self::Script, Self::Backend];

    /// 高亮使用的语言名
    pub fn language(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Style => "css",
            Self::Script => "javascript",
            Self::Backend => "python",
        }
    }

    /// WebView 中对应的元素 id
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Markup => "html-code",
            Self::Style => "css-code",
            Self::Script => "js-code",
            Self::Backend => "backend-code",
        }
    }

    fn source(self, artifact: &CodeArtifact) -> &str {
        match self {
            Self::Markup => &artifact.markup,
            Self::Style => &artifact.style,
            Self::Script => &artifact.script,
            Self::Backend => &artifact.backend,
        }
    }
}

/// 单个代码面板的渲染结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodePanel {
    pub region: PanelRegion,
    pub element_id: &'static str,
    pub language: &'static str,
    /// 转义后的 HTML 片段
    pub html: String,
}

/// 渲染阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderPhase {
    /// 占位预览，等待请求结果
    Tentative,
    /// 已确认的产物
    Confirmed,
}

/// 输出面板的可见性处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputReveal {
    /// 保持原样（添加功能时原地更新）
    Keep,
    /// 显示输出面板
    Show,
    /// 显示输出面板并滚动到可见位置
    ShowAndScroll,
}

/// 一次提交给呈现端的渲染帧
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub phase: RenderPhase,
    /// 预览文档
    pub preview: String,
    /// 代码面板；为 None 时呈现端保留原有面板
    pub panels: Option<Vec<CodePanel>>,
    pub reveal: OutputReveal,
}

/// 渲染帧的呈现端
pub trait RenderSurface: Send + Sync {
    fn present(&self, frame: &RenderFrame);
}

/// 渲染器保存的当前视图
#[derive(Debug, Clone, Default)]
struct RenderedView {
    artifact: Option<CodeArtifact>,
    preview: String,
    output_visible: bool,
}

/// 产物渲染器
pub struct ArtifactRenderer {
    view: RwLock<RenderedView>,
    surface: Arc<dyn RenderSurface>,
}

impl ArtifactRenderer {
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            view: RwLock::new(RenderedView::default()),
            surface,
        }
    }

    /// 提交暂定帧：预览替换为"生成中"占位文档，代码面板不变
    pub fn show_pending(&self) {
        let frame = RenderFrame {
            phase: RenderPhase::Tentative,
            preview: GENERATING_PLACEHOLDER.to_string(),
            panels: None,
            reveal: OutputReveal::Keep,
        };

        {
            let mut view = self.view.write().unwrap_or_else(PoisonError::into_inner);
            view.preview = frame.preview.clone();
        }
        self.surface.present(&frame);
    }

    /// 提交确认帧：产物完整替换所有代码面板和预览
    pub fn render(&self, artifact: &CodeArtifact, reveal: OutputReveal) {
        let frame = RenderFrame {
            phase: RenderPhase::Confirmed,
            preview: artifact.markup.clone(),
            panels: Some(build_panels(artifact)),
            reveal,
        };

        {
            let mut view = self.view.write().unwrap_or_else(PoisonError::into_inner);
            view.artifact = Some(artifact.clone());
            view.preview = frame.preview.clone();
            if reveal != OutputReveal::Keep {
                view.output_visible = true;
            }
        }
        self.surface.present(&frame);
    }

    /// 当前代码面板对应的产物
    pub fn artifact(&self) -> Option<CodeArtifact> {
        self.read().artifact.clone()
    }

    /// 当前预览文档
    pub fn preview_document(&self) -> String {
        self.read().preview.clone()
    }

    /// 输出面板是否已显示
    pub fn output_visible(&self) -> bool {
        self.read().output_visible
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RenderedView> {
        self.view.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 为产物的四个字段生成代码面板
pub fn build_panels(artifact: &CodeArtifact) -> Vec<CodePanel> {
    PanelRegion::ALL
        .iter()
        .map(|&region| CodePanel {
            region,
            element_id: region.element_id(),
            language: region.language(),
            html: highlight(region.source(artifact), region.language()),
        })
        .collect()
}

/// 把源码转义为可安全插入页面的代码块
pub fn highlight(source: &str, language: &str) -> String {
    let mut html = String::with_capacity(source.len() + 32);
    html.push_str("<code class=\"language-");
    html.push_str(language);
    html.push_str("\">");
    for c in source.chars() {
        match c {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\'' => html.push_str("&#39;"),
            c => html.push(c),
        }
    }
    html.push_str("</code>");
    html
}
