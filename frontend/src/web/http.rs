//! HTTP 请求封装模块
//!
//! 封装 `web_sys::fetch`，提供带全局超时的 HTTP 客户端。
//! 方法枚举复用端点协议里的 [`HttpMethod`]，避免两套定义。

use std::cell::Cell;
use std::rc::Rc;

use restohub_shared::protocol::HttpMethod;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

/// 全局请求超时（毫秒），所有请求统一，不支持按请求覆盖
pub const REQUEST_TIMEOUT_MS: i32 = 15_000;

/// HTTP 传输层错误
#[derive(Debug)]
pub enum HttpError {
    /// 请求构建失败
    BuildFailed(String),
    /// 网络请求失败
    Network(String),
    /// 超过全局超时被中止
    Timeout,
    /// 响应读取失败
    ReadFailed(String),
}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HttpError::BuildFailed(msg) => write!(f, "请求构建失败: {}", msg),
            HttpError::Network(msg) => write!(f, "网络错误: {}", msg),
            HttpError::Timeout => write!(f, "请求超时"),
            HttpError::ReadFailed(msg) => write!(f, "响应读取失败: {}", msg),
        }
    }
}

/// HTTP 响应封装
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 是否 2xx
    pub fn ok(&self) -> bool {
        self.inner.ok()
    }

    /// 读取响应体文本
    pub async fn text(self) -> Result<String, HttpError> {
        let promise = self
            .inner
            .text()
            .map_err(|e| HttpError::ReadFailed(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| HttpError::ReadFailed(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| HttpError::ReadFailed("无法转换为字符串".to_string()))
    }
}

/// HTTP 请求构建器
pub struct HttpRequestBuilder {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl HttpRequestBuilder {
    fn new(url: String, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置请求体
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 发送请求
    ///
    /// 超时由 `AbortController` 实现：到点中止 fetch，错误归为
    /// [`HttpError::Timeout`] 而不是普通网络错误。
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let headers = Headers::new()
            .map_err(|e| HttpError::BuildFailed(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &self.headers {
            headers
                .set(key, value)
                .map_err(|e| HttpError::BuildFailed(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(self.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &self.body {
            opts.set_body(&JsValue::from_str(body));
        }

        // 超时控制
        let controller = AbortController::new()
            .map_err(|e| HttpError::BuildFailed(format!("{:?}", e)))?;
        opts.set_signal(Some(&controller.signal()));

        let timed_out = Rc::new(Cell::new(false));
        let timeout_cb = {
            let controller = controller.clone();
            let timed_out = timed_out.clone();
            Closure::once(move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let window = web_sys::window()
            .ok_or_else(|| HttpError::Network("无法获取 window 对象".to_string()))?;

        let timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                timeout_cb.as_ref().unchecked_ref(),
                REQUEST_TIMEOUT_MS,
            )
            .map_err(|e| HttpError::BuildFailed(format!("{:?}", e)))?;

        let request = Request::new_with_str_and_init(&self.url, &opts)
            .map_err(|e| HttpError::BuildFailed(format!("{:?}", e)))?;

        let result = JsFuture::from(window.fetch_with_request(&request)).await;

        // 无论成败都先撤掉定时器
        window.clear_timeout_with_handle(timer);
        drop(timeout_cb);

        let resp_value = result.map_err(|e| {
            if timed_out.get() {
                HttpError::Timeout
            } else {
                HttpError::Network(format!("{:?}", e))
            }
        })?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| HttpError::ReadFailed(format!("Response 类型转换失败: {:?}", e)))?;

        Ok(HttpResponse { inner: response })
    }
}

/// 轻量级 HTTP 客户端
pub struct HttpClient;

impl HttpClient {
    /// 以任意方法创建请求，方法来自端点协议
    pub fn request(method: HttpMethod, url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), method)
    }
}
