//! # 持久化键值存储
//!
//! 提供跨会话保存的字符串键值对，用于：
//! - 最近一次成功生成的项目名称（`lastProjectName`）
//! - 主题偏好（`theme`）
//!
//! ## 存储格式
//! `~/.novaforge/storage.json`，一个扁平的 `{ "key": "value" }` JSON 对象。
//! 写入时先写临时文件再重命名，避免写到一半时崩溃留下损坏的文件。
//!
//! ## 线程安全
//! 读改写过程由 `tokio::sync::Mutex` 串行化，同一进程内的并发写入不会互相覆盖。

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

/// 存储文件名（位于数据目录下）
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// 持久化键值存储边界
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// 读取键值；键不存在时返回 `Ok(None)`
    async fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// 写入键值（覆盖已有值）
    async fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// 基于 JSON 文件的存储实现
pub struct JsonFileStore {
    /// 存储文件的绝对路径
    path: PathBuf,
    /// 串行化读改写过程
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    /// 创建指向指定文件的存储；文件和父目录在第一次写入时创建
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// 读取整个存储文件
    ///
    /// 文件不存在时返回空表；文件内容损坏时记录警告并同样返回空表，
    /// 使应用在存储损坏时仍能启动（下一次写入会覆盖损坏的内容）。
    async fn load(&self) -> Result<BTreeMap<String, String>, String> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| format!("读取存储文件失败: {}", e))?;

        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                log::warn!("存储文件 {} 已损坏，按空存储处理: {}", self.path.display(), e);
                Ok(BTreeMap::new())
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());

        // 确保父目录存在，递归创建所有缺失的目录
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| format!("创建存储目录失败: {}", e))?;
            }
        }

        let content = serde_json::to_string_pretty(&entries)
            .map_err(|e| format!("序列化存储内容失败: {}", e))?;

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| format!("写入存储临时文件失败: {}", e))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| format!("替换存储文件失败: {}", e))
    }
}

/// 进程内存储：不落盘，进程退出即丢失
///
/// 无法确定数据目录时作为降级方案使用。
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get("lastProjectName").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = JsonFileStore::new(&path);
        store.set("lastProjectName", "Shop").await.unwrap();
        store.set("theme", "dark").await.unwrap();
        store.set("lastProjectName", "Blog").await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("lastProjectName").await.unwrap().as_deref(), Some("Blog"));
        assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("dark"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get("theme").await.unwrap(), None);
        store.set("theme", "light").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));
    }
}
