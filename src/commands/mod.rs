//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `workflows` - 四个按钮工作流和文本输入回传
//! - `projects` - 当前项目、服务端项目列表、健康检查、定位归档
//! - `settings` - 主题和客户端配置的读写

pub mod projects;
pub mod settings;
pub mod workflows;
