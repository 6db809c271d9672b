//! # 请求闸门（按钮忙碌状态守卫）
//!
//! 每个触发按钮对应一个 `RequestGate`。一次请求进行期间：
//! - 按钮被禁用，文字替换为进行中的提示（或显示加载动画）
//! - 同一按钮的重复触发被拒绝（防止重入）
//!
//! 不同按钮的闸门互相独立，没有跨按钮的全局锁。
//!
//! ## 保证释放
//! `acquire()` 返回 `GateGuard`，守卫在 `Drop` 时把按钮恢复为获取前的外观
//! （启用、隐藏加载动画、还原原始文字）。无论工作流走成功、失败还是提前返回的路径，
//! 恢复都恰好执行一次。

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

/// 触发工作流的按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Control {
    Generate,
    AddFeature,
    Download,
    Deploy,
}

impl Control {
    /// 空闲时的按钮文字
    pub fn idle_label(self) -> &'static str {
        match self {
            Self::Generate => "🚀 Generate Website",
            Self::AddFeature => "➕ Add Feature",
            Self::Download => "📥 Download ZIP",
            Self::Deploy => "📦 Deploy",
        }
    }

    /// 请求进行中的外观
    ///
    /// 生成按钮隐藏文字、显示加载动画；下载按钮只禁用、不改文字；
    /// 其余按钮替换为进行中的文字。
    fn busy_appearance(self, idle: &ControlAppearance) -> ControlAppearance {
        let (label, loading) = match self {
            Self::Generate => (idle.label.clone(), true),
            Self::AddFeature => ("➕ Adding...".to_string(), false),
            Self::Download => (idle.label.clone(), false),
            Self::Deploy => ("📦 Copying...".to_string(), false),
        };
        ControlAppearance {
            enabled: false,
            label,
            loading,
        }
    }
}

/// 按钮外观
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlAppearance {
    /// 是否可点击
    pub enabled: bool,
    /// 显示的文字
    pub label: String,
    /// 是否显示加载动画（显示时文字隐藏）
    pub loading: bool,
}

impl ControlAppearance {
    fn idle(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
            loading: false,
        }
    }
}

/// 按钮外观的呈现端（桌面端为 WebView 事件，测试中为记录器）
pub trait ControlSurface: Send + Sync {
    fn update(&self, control: Control, appearance: &ControlAppearance);
}

struct GateState {
    in_flight: bool,
    appearance: ControlAppearance,
}

/// 单个按钮的请求闸门
pub struct RequestGate {
    control: Control,
    state: Mutex<GateState>,
    surface: Arc<dyn ControlSurface>,
}

impl RequestGate {
    pub fn new(control: Control, surface: Arc<dyn ControlSurface>) -> Self {
        Self {
            control,
            state: Mutex::new(GateState {
                in_flight: false,
                appearance: ControlAppearance::idle(control.idle_label()),
            }),
            surface,
        }
    }

    /// 当前外观
    pub fn appearance(&self) -> ControlAppearance {
        self.lock().appearance.clone()
    }

    /// 是否有请求正在进行
    pub fn is_in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// 进入忙碌状态
    ///
    /// # 返回值
    /// - `Some(guard)` - 获取成功，按钮已禁用；守卫释放时恢复原外观
    /// - `None` - 同一按钮已有请求在进行
    pub fn acquire(&self) -> Option<GateGuard<'_>> {
        let mut state = self.lock();
        if state.in_flight {
            return None;
        }

        let restore = state.appearance.clone();
        state.in_flight = true;
        state.appearance = self.control.busy_appearance(&restore);
        self.surface.update(self.control, &state.appearance);

        Some(GateGuard {
            gate: self,
            restore: Some(restore),
        })
    }

    fn release(&self, mut restore: ControlAppearance) {
        let mut state = self.lock();
        restore.enabled = true;
        restore.loading = false;
        state.in_flight = false;
        state.appearance = restore;
        self.surface.update(self.control, &state.appearance);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 忙碌状态守卫：离开作用域时恢复按钮
pub struct GateGuard<'a> {
    gate: &'a RequestGate,
    restore: Option<ControlAppearance>,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            self.gate.release(restore);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    #[test]
    fn test_acquire_disables_and_guard_restores() {
        let surface = Arc::new(RecordingSurface::default());
        let gate = RequestGate::new(Control::AddFeature, surface.clone());

        {
            let _guard = gate.acquire().unwrap();
            let busy = gate.appearance();
            assert!(!busy.enabled);
            assert_eq!(busy.label, "➕ Adding...");
            assert!(gate.is_in_flight());
        }

        assert_eq!(gate.appearance(), ControlAppearance::idle("➕ Add Feature"));
        assert!(!gate.is_in_flight());
        assert_eq!(surface.control_updates(Control::AddFeature).len(), 2);
    }

    #[test]
    fn test_reentrant_acquire_is_refused() {
        let surface = Arc::new(RecordingSurface::default());
        let gate = RequestGate::new(Control::Generate, surface);

        let guard = gate.acquire().unwrap();
        assert!(gate.acquire().is_none());
        drop(guard);
        assert!(gate.acquire().is_some());
    }

    #[test]
    fn test_generate_shows_loader_without_changing_label() {
        let surface = Arc::new(RecordingSurface::default());
        let gate = RequestGate::new(Control::Generate, surface);

        let _guard = gate.acquire().unwrap();
        let busy = gate.appearance();
        assert!(busy.loading);
        assert_eq!(busy.label, Control::Generate.idle_label());
    }

    #[test]
    fn test_deploy_label_swaps_and_restores() {
        let surface = Arc::new(RecordingSurface::default());
        let gate = RequestGate::new(Control::Deploy, surface.clone());

        let guard = gate.acquire().unwrap();
        assert_eq!(gate.appearance().label, "📦 Copying...");
        assert!(!gate.appearance().loading);
        drop(guard);

        assert_eq!(gate.appearance(), ControlAppearance::idle("📦 Deploy"));
        let updates = surface.control_updates(Control::Deploy);
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].label, "📦 Deploy");
    }

    #[test]
    fn test_gates_are_independent() {
        let surface = Arc::new(RecordingSurface::default());
        let generate = RequestGate::new(Control::Generate, surface.clone());
        let download = RequestGate::new(Control::Download, surface);

        let _busy = generate.acquire().unwrap();
        assert!(download.acquire().is_some());
    }
}
