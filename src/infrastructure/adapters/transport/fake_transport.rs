//! Fake Transport - 用于测试的传输实现
//!
//! 按端点预置响应，并记录收到的每个请求，不访问网络

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use crate::application::ports::{HttpRequest, HttpResponse, HttpTransportPort, TransportError};

#[derive(Default)]
struct FakeTransportState {
    /// 端点 -> 依次返回的结果
    scripted: HashMap<String, VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Vec<HttpRequest>,
}

/// Fake Transport
///
/// 同一端点的预置结果按先进先出消费；未预置的端点返回 404
#[derive(Default)]
pub struct FakeTransport {
    state: Mutex<FakeTransportState>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeTransportState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, endpoint: &str, result: Result<HttpResponse, TransportError>) -> &Self {
        self.lock()
            .scripted
            .entry(endpoint.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// 预置一个文本响应
    pub fn respond(&self, endpoint: &str, body: &str) -> &Self {
        self.push(endpoint, Ok(HttpResponse::ok(body.as_bytes().to_vec())))
    }

    pub fn respond_with(&self, endpoint: &str, response: HttpResponse) -> &Self {
        self.push(endpoint, Ok(response))
    }

    /// 预置一个传输错误
    pub fn fail(&self, endpoint: &str, error: TransportError) -> &Self {
        self.push(endpoint, Err(error))
    }

    /// 已收到的请求，按到达顺序
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock().requests.clone()
    }
}

#[async_trait]
impl HttpTransportPort for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.lock();
        let endpoint = request.endpoint.clone();
        tracing::debug!(method = %request.method, endpoint = %endpoint, "FakeTransport: request");
        state.requests.push(request);

        state
            .scripted
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(TransportError::Status {
                    status: 404,
                    body: format!("No response scripted for {}", endpoint),
                })
            })
    }
}
