//! # 项目归档服务
//!
//! 将代码产物打包为 ZIP，并保存到本地。
//!
//! ## 归档布局
//! 固定四个成员，与源语言无关：
//!
//! | 成员 | 来源字段 |
//! |------|----------|
//! | `index.html` | markup |
//! | `style.css` | style |
//! | `app.js` | script |
//! | `backend.py` | backend |
//!
//! 内容原样写入。所有成员使用固定的修改时间（1980-01-01），
//! 同一产物两次打包得到逐字节相同的归档。

use std::io::{Cursor, Write};
use std::path::PathBuf;

use async_trait::async_trait;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::models::artifact::CodeArtifact;
use crate::utils::path;

/// 归档成员名称（按写入顺序）
pub const ARCHIVE_MEMBERS: [&str; 4] = ["index.html", "style.css", "app.js", "backend.py"];

/// 将产物打包为 ZIP 字节
///
/// # 错误
/// ZIP 写入失败时返回错误信息
pub fn pack(artifact: &CodeArtifact) -> Result<Vec<u8>, String> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let contents = [
        &artifact.markup,
        &artifact.style,
        &artifact.script,
        &artifact.backend,
    ];

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in ARCHIVE_MEMBERS.iter().zip(contents) {
        writer
            .start_file(*name, options)
            .map_err(|e| format!("创建归档成员 {} 失败: {}", name, e))?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| format!("写入归档成员 {} 失败: {}", name, e))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| format!("完成归档失败: {}", e))?;
    Ok(cursor.into_inner())
}

/// 归档保存结果
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArchive {
    /// 归档文件名（`<项目名>.zip`）
    pub file_name: String,
    /// 保存位置的绝对路径
    pub location: PathBuf,
    /// 字节数
    pub size: usize,
}

/// 归档的保存端
#[async_trait]
pub trait ArchiveSink: Send + Sync {
    /// 保存归档；`file_name` 为 `<项目名>.zip`
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<SavedArchive, String>;
}

/// 保存到指定目录
///
/// 同名归档直接覆盖：再次下载同一项目时 `<项目名>.zip` 总是最新版本。
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 保存到系统下载目录
    pub fn downloads() -> Result<Self, String> {
        Ok(Self::new(path::get_download_path()?))
    }
}

#[async_trait]
impl ArchiveSink for DirectorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<SavedArchive, String> {
        // 确保保存目录存在
        if !self.dir.exists() {
            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| format!("创建保存目录失败: {}", e))?;
        }

        // 文件名可能来自用户输入的项目名称，先去掉路径成分
        let stem = file_name.strip_suffix(".zip").unwrap_or(file_name);
        let safe_name = path::archive_file_name(stem);
        let location = self.dir.join(&safe_name);

        // 已存在的同名文件被替换
        tokio::fs::write(&location, bytes)
            .await
            .map_err(|e| format!("写入归档文件失败: {}", e))?;

        Ok(SavedArchive {
            file_name: safe_name,
            location,
            size: bytes.len(),
        })
    }
}
