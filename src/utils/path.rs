//! # 路径工具函数
//!
//! 提供与文件路径相关的工具函数，包括：
//! - 获取 NovaForge 自身数据目录路径（`~/.novaforge/`）
//! - 获取下载 ZIP 的保存目录
//! - 将项目名称转换为安全的归档文件名

use std::path::PathBuf;

/// 获取 NovaForge 数据目录的绝对路径
///
/// 客户端配置（`client-config.json`）和持久化键值存储（`storage.json`）
/// 都位于此目录下。使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 错误
/// 如果无法确定用户主目录（极端情况，如无 HOME 环境变量），返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\.novaforge`
/// - Linux/macOS: `/home/username/.novaforge`
pub fn get_app_data_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(home.join(".novaforge"))
}

/// 获取 ZIP 归档的保存目录
///
/// 优先使用系统下载目录；无法确定时回落到 `~/.novaforge/downloads`。
pub fn get_download_path() -> Result<PathBuf, String> {
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => Ok(get_app_data_path()?.join("downloads")),
    }
}

/// 由项目名称得到归档文件名 `<name>.zip`
///
/// 项目名称原样保留，只把会被解释为路径的字符（路径分隔符、`..` 组件、
/// Windows 保留字符）替换为 `-`，确保文件落在保存目录内。
pub fn archive_file_name(project_name: &str) -> String {
    let cleaned: String = project_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    // 纯点号的名称（"."、".."）会指向目录本身或父目录
    let cleaned = if cleaned.trim_matches('.').is_empty() {
        "project".to_string()
    } else {
        cleaned
    };

    format!("{}.zip", cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_file_name_keeps_plain_names() {
        assert_eq!(archive_file_name("Shop"), "Shop.zip");
        assert_eq!(archive_file_name("My Website"), "My Website.zip");
    }

    #[test]
    fn test_archive_file_name_strips_separators() {
        assert_eq!(archive_file_name("../etc/passwd"), "..-etc-passwd.zip");
        assert_eq!(archive_file_name(r"a\b:c"), "a-b-c.zip");
        assert_eq!(archive_file_name(".."), "project.zip");
    }
}
