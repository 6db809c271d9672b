//! # 通知通道
//!
//! 非阻塞的临时状态消息（成功 / 错误），显示固定时长（4 秒）后自动消失。
//! 多条通知同时存在时各自独立叠放，不做替换或去重。
//!
//! 自动消失由 tokio 定时任务完成；没有运行时（同步上下文）时通知只显示、不计时，
//! 并记录一条警告。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;

/// 通知显示时长
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// 一条通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// 通道内唯一的通知编号，用于消失时定位
    pub id: u64,
    pub message: String,
    pub kind: NoticeKind,
    /// 显示时长（毫秒）
    pub ttl_ms: u64,
}

/// 通知的呈现端
pub trait NoticeSink: Send + Sync {
    fn show(&self, notice: &Notice);
    fn dismiss(&self, id: u64);
}

struct ChannelInner {
    sink: Arc<dyn NoticeSink>,
    next_id: AtomicU64,
    active: Mutex<Vec<Notice>>,
    ttl: Duration,
}

impl ChannelInner {
    fn dismiss(&self, id: u64) {
        let removed = {
            let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            let before = active.len();
            active.retain(|notice| notice.id != id);
            active.len() != before
        };
        if removed {
            self.sink.dismiss(id);
        }
    }
}

/// 通知通道（克隆开销很小，所有克隆共享同一组通知）
#[derive(Clone)]
pub struct NotificationChannel {
    inner: Arc<ChannelInner>,
}

impl NotificationChannel {
    pub fn new(sink: Arc<dyn NoticeSink>) -> Self {
        Self::with_ttl(sink, NOTICE_TTL)
    }

    pub fn with_ttl(sink: Arc<dyn NoticeSink>, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                sink,
                next_id: AtomicU64::new(1),
                active: Mutex::new(Vec::new()),
                ttl,
            }),
        }
    }

    /// 显示一条通知，返回其编号
    pub fn notify(&self, message: impl Into<String>, kind: NoticeKind) -> u64 {
        let notice = Notice {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            kind,
            ttl_ms: self.inner.ttl.as_millis() as u64,
        };
        let id = notice.id;

        self.inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
        self.inner.sink.show(&notice);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = self.inner.clone();
                handle.spawn(async move {
                    tokio::time::sleep(inner.ttl).await;
                    inner.dismiss(id);
                });
            }
            Err(_) => log::warn!("没有可用的异步运行时，通知 #{} 不会自动消失", id),
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NoticeKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NoticeKind::Error)
    }

    /// 当前仍在显示的通知（按显示顺序）
    #[cfg(test)]
    pub fn active(&self) -> Vec<Notice> {
        self.inner
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    #[tokio::test(start_paused = true)]
    async fn test_notices_stack_and_expire_after_four_seconds() {
        let surface = Arc::new(RecordingSurface::default());
        let channel = NotificationChannel::new(surface.clone());

        let first = channel.success("✅ Website generated successfully");
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = channel.error("⚠️ Failed to add feature");
        assert_eq!(channel.active().len(), 2);

        tokio::time::sleep(Duration::from_millis(3100)).await;
        let active = channel.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second);
        assert_eq!(surface.dismissed(), vec![first]);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(channel.active().is_empty());
        assert_eq!(surface.dismissed(), vec![first, second]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_messages_are_not_deduplicated() {
        let surface = Arc::new(RecordingSurface::default());
        let channel = NotificationChannel::new(surface.clone());

        channel.error("⚠️ Failed to download project");
        channel.error("⚠️ Failed to download project");

        assert_eq!(channel.active().len(), 2);
        assert_eq!(surface.notices().len(), 2);
        assert_eq!(surface.notices()[0].ttl_ms, 4000);
    }

    #[test]
    fn test_notify_without_runtime_still_shows() {
        let surface = Arc::new(RecordingSurface::default());
        let channel = NotificationChannel::new(surface.clone());
        channel.success("📥 Project ZIP downloaded.");
        assert_eq!(surface.notices()[0].kind, NoticeKind::Success);
    }
}
