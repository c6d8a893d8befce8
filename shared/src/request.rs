use crate::error::{ApiError, ApiResult};
use crate::{ErrorBody, protocol::HttpMethod};
use serde::de::DeserializeOwned;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// 按名称查找请求头（不区分大小写）
    #[cfg(any(test, feature = "mock"))]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体按 `null` 处理
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body = self.body.trim();
        let body = if body.is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(ApiError::from)
    }

    /// JSON 错误体中的 `message` 字段
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// HTTP 客户端特性 (Trait)
/// (?Send) 是因为浏览器 fetch 返回的 Future 不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试替身 (Test double)
// =========================================================

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use crate::client::TokenStore;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// 按 `(method, url)` 回放预设响应，并记录收到的每个请求
    #[derive(Default)]
    pub struct MockHttpClient {
        responses: RefCell<HashMap<(HttpMethod, String), HttpResponse>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .insert((method, url.to_string()), HttpResponse::new(status, body));
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            let key = (req.method, req.url.clone());
            self.requests.borrow_mut().push(req);
            self.responses
                .borrow()
                .get(&key)
                .cloned()
                .ok_or_else(|| ApiError::Network(format!("no mock for {} {}", key.0.as_str(), key.1)))
        }
    }

    /// 内存中的令牌存储
    #[derive(Default)]
    pub struct MemoryTokenStore {
        pub token: RefCell<Option<String>>,
    }

    impl MemoryTokenStore {
        pub fn with_token(token: &str) -> Self {
            Self {
                token: RefCell::new(Some(token.to_string())),
            }
        }
    }

    impl TokenStore for MemoryTokenStore {
        fn token(&self) -> Option<String> {
            self.token.borrow().clone()
        }
        fn store(&self, token: &str) {
            *self.token.borrow_mut() = Some(token.to_string());
        }
        fn clear(&self) {
            *self.token.borrow_mut() = None;
        }
    }
}
