//! HTTP Transport Client - 调用 MARY TTS HTTP 服务
//!
//! 实现 HttpTransportPort trait
//!
//! 服务端 API:
//! GET  http://localhost:59125/voices
//! POST http://localhost:59125/process  (application/x-www-form-urlencoded)

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::application::ports::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransportPort, TransportError,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP 传输客户端配置
#[derive(Debug, Clone)]
pub struct HttpTransportClientConfig {
    /// 服务端根地址
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpTransportClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:59125".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpTransportClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 传输客户端
///
/// 每次调用只发送一次请求，不做重试
pub struct HttpTransportClient {
    client: Client,
    base_url: Url,
}

impl HttpTransportClient {
    pub fn new(config: HttpTransportClientConfig) -> Result<Self, TransportError> {
        let base_url = parse_base_url(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// 端点的完整 URL
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| TransportError::Connect(format!("Invalid endpoint {:?}: {}", endpoint, e)))
    }
}

/// 根地址统一以 `/` 结尾，便于拼接相对路径
fn parse_base_url(base_url: &str) -> Result<Url, TransportError> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&normalized)
        .map_err(|e| TransportError::Connect(format!("Invalid base URL {:?}: {}", base_url, e)))
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(format!("Cannot connect to MARY server: {}", e))
    } else {
        TransportError::Connect(e.to_string())
    }
}

#[async_trait]
impl HttpTransportPort for HttpTransportClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut url = self.endpoint_url(&request.endpoint)?;

        let builder = match request.method {
            HttpMethod::Get => {
                if !request.params.is_empty() {
                    url.set_query(Some(&request.params.encode()));
                }
                self.client.get(url.clone())
            }
            HttpMethod::Post => self
                .client
                .post(url.clone())
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(request.params.encode()),
        };

        tracing::debug!(
            method = %request.method,
            url = %url,
            params = request.params.len(),
            "Sending HTTP request"
        );

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), url = %url, "Server returned error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Body(e.to_string())
                }
            })?
            .to_vec();

        tracing::debug!(
            status = status.as_u16(),
            content_type = ?content_type,
            size = body.len(),
            "HTTP response received"
        );

        Ok(HttpResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthesis::FormParams;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> HttpTransportClient {
        HttpTransportClient::new(HttpTransportClientConfig::new(server.url()).with_timeout(5))
            .unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = HttpTransportClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:59125");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_endpoint_url_joining() {
        let client =
            HttpTransportClient::new(HttpTransportClientConfig::new("http://mary.local:59125/tts"))
                .unwrap();
        assert_eq!(
            client.endpoint_url("voices").unwrap().as_str(),
            "http://mary.local:59125/tts/voices"
        );
        assert_eq!(
            client.endpoint_url("/process").unwrap().as_str(),
            "http://mary.local:59125/tts/process"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpTransportClient::new(HttpTransportClientConfig::new("not a url")).is_err());
    }

    #[tokio::test]
    async fn test_get_with_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/exampletext")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("datatype".into(), "TEXT".into()),
                Matcher::UrlEncoded("locale".into(), "en_US".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "text/plain; charset=UTF-8")
            .with_body("Hello world")
            .create_async()
            .await;

        let request = HttpRequest::get("exampletext").with_params(
            FormParams::new()
                .with("datatype", "TEXT")
                .with("locale", "en_US"),
        );
        let response = client_for(&server).send(request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.text(), "Hello world");
        assert_eq!(
            response.content_type.as_deref(),
            Some("text/plain; charset=UTF-8")
        );
    }

    #[tokio::test]
    async fn test_post_is_form_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/process")
            .match_header("content-type", FORM_CONTENT_TYPE)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("INPUT_TEXT".into(), "Hello & goodbye".into()),
                Matcher::UrlEncoded("AUDIO".into(), "WAVE_FILE".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "audio/x-wav")
            .with_body(b"RIFF\x00\x01")
            .create_async()
            .await;

        let params = FormParams::new()
            .with("INPUT_TEXT", "Hello & goodbye")
            .with("AUDIO", "WAVE_FILE");
        let response = client_for(&server)
            .send(HttpRequest::post("process", params))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.body, b"RIFF\x00\x01".to_vec());
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/process")
            .with_status(500)
            .with_body("Cannot synthesize: unknown voice")
            .create_async()
            .await;

        let err = client_for(&server)
            .send(HttpRequest::post("process", FormParams::new()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                body: "Cannot synthesize: unknown voice".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // 端口 1 上通常没有服务
        let client =
            HttpTransportClient::new(HttpTransportClientConfig::new("http://127.0.0.1:1")).unwrap();
        let err = client.send(HttpRequest::get("voices")).await.unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)));
    }
}
