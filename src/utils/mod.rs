//! # 通用工具模块
//!
//! - `path` - 数据目录、下载目录和归档文件名

pub mod path;
