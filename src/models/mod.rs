//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型和生成服务 JSON 一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` 和/或 `Deserialize`，用于 Tauri IPC 传输、HTTP 请求和 JSON 文件读写。
//! - `artifact` - 四段式代码产物、回退产物和占位预览
//! - `project` - 生成表单、请求体和响应信封
//! - `settings` - 客户端配置和主题偏好

pub mod artifact;
pub mod project;
pub mod settings;
