//! API 客户端模块
//!
//! 所有出站请求的汇聚点：拼接基础 URL、附加 Bearer 凭据、
//! 统一解析响应与错误。凭据过期（401）不在这里动存储，
//! 只触发注入的回调，由会话容器完成清理。
//! 传输层抽象成 trait，测试用内存实现替换 fetch。

use std::sync::Arc;

use async_trait::async_trait;
use restohub_shared::protocol::{ApiRequest, HttpMethod};
use restohub_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};
use serde::Deserialize;

use crate::web::{HttpClient, HttpError};

mod resources;
#[cfg(test)]
mod tests;

// =========================================================
// 错误类型
// =========================================================

/// API 层错误
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 网络失败
    Network(String),
    /// 超过全局超时
    Timeout,
    /// 凭据缺失或已过期（401）
    Unauthorized,
    /// 响应解析失败
    Decode(String),
    /// 后端返回的业务错误
    Api { status: u16, message: String },
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "网络错误: {}", msg),
            ApiError::Timeout => write!(f, "请求超时，请稍后重试"),
            ApiError::Unauthorized => write!(f, "登录已过期"),
            ApiError::Decode(msg) => write!(f, "响应解析失败: {}", msg),
            ApiError::Api { status, message } => write!(f, "请求失败 ({}): {}", status, message),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Timeout => ApiError::Timeout,
            HttpError::BuildFailed(msg) | HttpError::Network(msg) => ApiError::Network(msg),
            HttpError::ReadFailed(msg) => ApiError::Decode(msg),
        }
    }
}

/// 后端错误响应的通用外形，尽力解析
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// =========================================================
// 传输层抽象
// =========================================================

/// 构建完成、可直接发出的请求
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PreparedRequest {
    /// 按名称查请求头（测试断言用）
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// 原始响应
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, req: PreparedRequest) -> Result<RawResponse, ApiError>;
}

/// 浏览器 fetch 传输
#[derive(Clone, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn execute(&self, req: PreparedRequest) -> Result<RawResponse, ApiError> {
        let mut builder = HttpClient::request(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}

// =========================================================
// 客户端
// =========================================================

/// 平台 API 客户端
///
/// 每个资源的操作见 `resources` 子模块；本体只负责请求装配、
/// 凭据附加与响应解析。
#[derive(Clone)]
pub struct RestoHubApi<T: Transport = FetchTransport> {
    base_url: String,
    token: Option<String>,
    // Arc 而非 Rc：客户端随会话状态放进 signal，载荷要求 Send + Sync
    on_unauthorized: Option<Arc<dyn Fn() + Send + Sync>>,
    transport: T,
}

impl RestoHubApi<FetchTransport> {
    /// 公开端点客户端（登录 / 注册前使用，不持有凭据）
    pub fn public(base_url: &str) -> Self {
        Self::with_transport(base_url, None, None, FetchTransport)
    }

    /// 认证客户端；凭据过期时触发回调
    pub fn new(
        base_url: &str,
        token: String,
        on_unauthorized: Arc<dyn Fn() + Send + Sync>,
    ) -> Self {
        Self::with_transport(base_url, Some(token), Some(on_unauthorized), FetchTransport)
    }
}

impl<T: Transport> RestoHubApi<T> {
    /// 指定传输层构造（测试注入 Mock 的入口）
    pub fn with_transport(
        base_url: &str,
        token: Option<String>,
        on_unauthorized: Option<Arc<dyn Fn() + Send + Sync>>,
        transport: T,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            on_unauthorized,
            transport,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 由类型化请求装配传输层请求
    fn prepare<R: ApiRequest>(&self, req: &R) -> PreparedRequest {
        let body = req.body();
        let mut headers = Vec::new();

        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        // 公开端点不附凭据；无凭据的受保护请求原样发出，由后端拒绝
        if !R::PUBLIC {
            if let Some(token) = &self.token {
                headers.push((
                    HEADER_AUTHORIZATION.to_string(),
                    format!("{}{}", BEARER_PREFIX, token),
                ));
            }
        }

        PreparedRequest {
            method: R::METHOD,
            url: self.url(&req.path()),
            headers,
            body,
        }
    }

    /// 发送一次类型化请求
    pub async fn send<R: ApiRequest>(&self, req: &R) -> Result<R::Response, ApiError> {
        let prepared = self.prepare(req);
        let response = self.transport.execute(prepared).await?;

        if response.status == 401 {
            // 凭据失效：通知会话容器清理，这里只上报错误
            if let Some(callback) = &self.on_unauthorized {
                callback();
            }
            return Err(ApiError::Unauthorized);
        }

        if !(200..300).contains(&response.status) {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("HTTP {}", response.status));
            return Err(ApiError::Api {
                status: response.status,
                message,
            });
        }

        // 空响应体按 null 解析，配合 `()` 响应类型
        let source = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(source).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
