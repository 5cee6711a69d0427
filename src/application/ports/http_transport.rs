//! HTTP Transport Port - 与 TTS 服务端通信的抽象
//!
//! 定义单次 HTTP 请求/响应的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::synthesis::FormParams;

/// 传输错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timeout")]
    Timeout,

    /// 非 2xx 响应，携带服务端返回的正文
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// HTTP 请求
///
/// GET 的参数编码为查询串，POST 的参数作为表单请求体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// 相对于服务端根地址的路径，如 `process`、`voices`
    pub endpoint: String,
    pub params: FormParams,
}

impl HttpRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: endpoint.into(),
            params: FormParams::new(),
        }
    }

    pub fn post(endpoint: impl Into<String>, params: FormParams) -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint: endpoint.into(),
            params,
        }
    }

    pub fn with_params(mut self, params: FormParams) -> Self {
        self.params = params;
        self
    }
}

/// HTTP 响应（仅 2xx）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: None,
            body: body.into(),
        }
    }

    /// 正文按 UTF-8 解码，非法字节被替换
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP Transport Port
///
/// 每次调用只发送一次请求，不做重试
#[async_trait]
pub trait HttpTransportPort: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
