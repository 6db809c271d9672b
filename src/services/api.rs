//! # 生成服务 HTTP 客户端
//!
//! 封装与远程生成服务的全部通信：
//! - `POST /api/generate` - 生成新项目
//! - `POST /api/add-feature` - 为已有项目添加功能
//! - `GET /api/projects/{name}` - 读取服务端保存的项目产物（名称经过百分号编码）
//! - `POST /api/deploy` - 将项目复制到部署目标
//! - `GET /api/projects` - 列出已保存的项目
//! - `GET /api/health` - 后端健康检查
//!
//! ## 成功判定
//! 传输成功（2xx）**且**响应体 `success == true` 才算成功。
//! 传输错误、非 2xx、`success=false`、响应体格式错误统一转换为 `ApiError`，
//! 由工作流层决定如何呈现。
//!
//! 工作流只依赖 `GeneratorApi` trait，测试时可替换为脚本化的实现。

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder, Url};

use crate::models::artifact::CodeArtifact;
use crate::models::project::{
    ApiEnvelope, DeployReceipt, DeployRequest, FeatureRequest, GenerateRequest, HealthStatus,
};
use crate::services::error::ApiError;

/// 远程生成服务边界
#[async_trait]
pub trait GeneratorApi: Send + Sync {
    /// 生成新项目
    async fn generate(&self, request: &GenerateRequest) -> Result<CodeArtifact, ApiError>;

    /// 为已有项目添加功能，返回更新后的完整产物
    async fn add_feature(&self, request: &FeatureRequest) -> Result<CodeArtifact, ApiError>;

    /// 读取服务端保存的项目产物（只读）
    async fn fetch_project(&self, project_name: &str) -> Result<CodeArtifact, ApiError>;

    /// 请求服务端将项目复制到部署目标
    async fn deploy(&self, request: &DeployRequest) -> Result<DeployReceipt, ApiError>;

    /// 列出服务端已保存的项目名称
    async fn list_projects(&self) -> Result<Vec<String>, ApiError>;

    /// 后端健康检查
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

/// 基于 reqwest 的 HTTP 实现
///
/// 不设置请求超时：请求一旦发出就一直运行到成功或失败。
pub struct HttpGeneratorApi {
    client: Client,
    base_url: Url,
}

impl HttpGeneratorApi {
    /// 创建客户端
    ///
    /// # 参数
    /// - `base_url` - 生成服务基地址（如 `http://localhost:5000`），可以带路径前缀
    ///
    /// # 错误
    /// 基地址无法解析或不能作为基地址（如 `mailto:`）时返回 `ApiError::InvalidBaseUrl`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: parsed,
        })
    }

    /// 在基地址后追加路径段，每段单独百分号编码
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 发送请求并按统一规则解析响应信封
    async fn send(&self, request: RequestBuilder) -> Result<ApiEnvelope, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status: StatusCode = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let parsed = serde_json::from_str::<ApiEnvelope>(&body);

        // 非 2xx：尽量从响应体中取出错误说明
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                error: parsed.ok().and_then(|envelope| envelope.error),
            });
        }

        let envelope = parsed.map_err(|e| ApiError::Malformed(e.to_string()))?;
        if !envelope.success {
            return Err(ApiError::Rejected(envelope.error));
        }

        Ok(envelope)
    }

    /// 成功响应中必须带有 `code`
    fn take_code(envelope: ApiEnvelope) -> Result<CodeArtifact, ApiError> {
        envelope
            .code
            .ok_or_else(|| ApiError::Malformed("response is missing `code`".to_string()))
    }
}

#[async_trait]
impl GeneratorApi for HttpGeneratorApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<CodeArtifact, ApiError> {
        let url = self.endpoint(&["api", "generate"])?;
        let envelope = self.send(self.client.post(url).json(request)).await?;
        Self::take_code(envelope)
    }

    async fn add_feature(&self, request: &FeatureRequest) -> Result<CodeArtifact, ApiError> {
        let url = self.endpoint(&["api", "add-feature"])?;
        let envelope = self.send(self.client.post(url).json(request)).await?;
        Self::take_code(envelope)
    }

    async fn fetch_project(&self, project_name: &str) -> Result<CodeArtifact, ApiError> {
        let url = self.endpoint(&["api", "projects", project_name])?;
        let envelope = self.send(self.client.get(url)).await?;
        Self::take_code(envelope)
    }

    async fn deploy(&self, request: &DeployRequest) -> Result<DeployReceipt, ApiError> {
        let url = self.endpoint(&["api", "deploy"])?;
        let envelope = self.send(self.client.post(url).json(request)).await?;
        Ok(DeployReceipt {
            message: envelope.message,
        })
    }

    async fn list_projects(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["api", "projects"])?;
        let envelope = self.send(self.client.get(url)).await?;
        Ok(envelope.projects.unwrap_or_default())
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["api", "health"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                error: None,
            });
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }
}
