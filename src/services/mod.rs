//! # 业务逻辑服务模块
//!
//! 包含编排核心的实现，与 Tauri command 层解耦：
//! - `api` - 生成服务 HTTP 客户端（`GeneratorApi` 边界）
//! - `archive` - ZIP 打包和归档保存
//! - `config` - 客户端配置读写
//! - `error` - 远程接口和工作流的错误分类
//! - `gate` - 按钮请求闸门（忙碌状态与防重入）
//! - `notify` - 自动消失的通知通道
//! - `preferences` - 主题偏好
//! - `project_state` - 当前项目标识（唯一的共享可变状态）
//! - `prompt` - 阻塞式提示、确认和文本输入
//! - `renderer` - 两阶段产物渲染
//! - `store` - 持久化键值存储
//! - `studio` - 编排根对象
//! - `workflows` - 生成 / 添加功能 / 下载 / 部署四个工作流

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod gate;
pub mod notify;
pub mod preferences;
pub mod project_state;
pub mod prompt;
pub mod renderer;
pub mod store;
pub mod studio;
pub mod workflows;
