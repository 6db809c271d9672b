//! # 当前项目状态
//!
//! 持有最近一次成功生成的项目名称（项目标识），是四个工作流共享的唯一可变状态。
//!
//! ## 访问规则
//! - 只有生成工作流在成功完成后调用 `set()`
//! - 添加功能、下载、部署只通过 `current()` 读取
//! - 空字符串等同于"没有项目"，依赖项目标识的操作必须拒绝执行
//!
//! ## 写入串行化
//! `exclusive()` 返回一个异步互斥锁守卫。生成、添加功能、部署在网络请求期间持有它，
//! 使对同一项目标识的读写按触发顺序依次完成，而不是后完成者覆盖先完成者。

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{Mutex, MutexGuard};

use crate::services::store::KeyValueStore;

/// 项目标识在持久化存储中的键
pub const LAST_PROJECT_KEY: &str = "lastProjectName";

/// 当前项目状态访问器
pub struct ProjectState {
    /// 内存中的项目标识
    identity: RwLock<Option<String>>,
    /// 持久化存储
    store: Arc<dyn KeyValueStore>,
    /// 串行化依赖项目标识的远程操作
    sequence: Mutex<()>,
}

impl ProjectState {
    /// 从持久化存储恢复上一次会话的项目标识
    ///
    /// 存储读取失败时记录警告并以"没有项目"启动。
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let restored = match store.get(LAST_PROJECT_KEY).await {
            Ok(value) => value.filter(|name| !name.is_empty()),
            Err(e) => {
                log::warn!("恢复上次项目失败: {}", e);
                None
            }
        };

        if let Some(name) = &restored {
            log::info!("已恢复上次项目: {}", name);
        }

        Self {
            identity: RwLock::new(restored),
            store,
            sequence: Mutex::new(()),
        }
    }

    /// 当前项目标识；没有成功生成过项目时返回 None
    pub fn current(&self) -> Option<String> {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 设置项目标识并持久化
    ///
    /// 内存中的值总是先更新；持久化失败时返回错误，但内存中的新值保留，
    /// 本次会话内的后续操作仍然使用新项目。
    pub async fn set(&self, name: &str) -> Result<(), String> {
        *self.identity.write().unwrap_or_else(PoisonError::into_inner) = Some(name.to_string());
        self.store.set(LAST_PROJECT_KEY, name).await
    }

    /// 获取项目标识的独占顺序
    pub async fn exclusive(&self) -> MutexGuard<'_, ()> {
        self.sequence.lock().await
    }
}
