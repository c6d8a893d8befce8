//! API 客户端
//!
//! 把 [`ApiRequest`] 转成 [`HttpRequest`]，附上会话令牌并统一处理响应：
//!
//! - 401：清除已存令牌，返回 [`ApiError::Unauthorized`]
//! - 其他非 2xx：返回带服务端消息的 [`ApiError::Server`]
//! - 2xx：解析为请求对应的响应类型

use crate::error::{ApiError, ApiResult, MSG_LOGIN_FAILED, MSG_REQUEST_FAILED};
use crate::protocol::{ApiRequest, LoginRequest, MeRequest};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::{AuthResponse, AuthUser, CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use tracing::{debug, warn};

/// 会话令牌的存放位置
pub trait TokenStore {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

#[derive(Debug, Clone)]
pub struct ApiClient<C, S> {
    base_url: String,
    http: C,
    tokens: S,
}

impl<C: HttpClient, S: TokenStore> ApiClient<C, S> {
    pub fn new(base_url: impl Into<String>, http: C, tokens: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            tokens,
        }
    }

    #[cfg(test)]
    fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn has_token(&self) -> bool {
        self.tokens.token().is_some_and(|t| !t.is_empty())
    }

    fn build<R: ApiRequest>(&self, req: &R, with_token: bool) -> ApiResult<HttpRequest> {
        let mut http_req = HttpRequest::new(&self.url(&req.path()), R::METHOD)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if with_token {
            if let Some(token) = self.tokens.token().filter(|t| !t.is_empty()) {
                http_req = http_req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        if R::METHOD.has_body() {
            http_req = http_req.with_body(serde_json::to_string(req)?);
        }

        Ok(http_req)
    }

    async fn execute(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();
        let resp = self.http.send(req).await?;
        debug!(method = method.as_str(), %url, status = resp.status, "api response");
        Ok(resp)
    }

    /// 发送需认证的请求
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let resp = self.execute(self.build(req, true)?).await?;

        if resp.status == 401 {
            warn!(path = %req.path(), "session rejected, clearing token");
            self.tokens.clear();
            return Err(ApiError::Unauthorized);
        }

        if !resp.is_success() {
            let message = resp
                .error_message()
                .unwrap_or_else(|| MSG_REQUEST_FAILED.to_string());
            warn!(path = %req.path(), status = resp.status, %message, "request failed");
            return Err(ApiError::server(resp.status, message));
        }

        resp.json()
    }

    /// 用账号密码换取令牌，成功后立即保存
    ///
    /// 这里的 401 表示凭据错误，按服务端消息报告，而不是当作会话过期。
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self.execute(self.build(&req, false)?).await?;

        if !resp.is_success() {
            let message = resp
                .error_message()
                .unwrap_or_else(|| MSG_LOGIN_FAILED.to_string());
            return Err(ApiError::server(resp.status, message));
        }

        let auth: AuthResponse = resp.json()?;
        self.tokens.store(&auth.token);
        Ok(auth)
    }

    /// 校验已存令牌并返回其所属用户
    pub async fn me(&self) -> ApiResult<AuthUser> {
        if !self.has_token() {
            return Err(ApiError::Unauthorized);
        }

        let resp = self.execute(self.build(&MeRequest, true)?).await?;
        if !resp.is_success() {
            self.tokens.clear();
            return Err(ApiError::Unauthorized);
        }

        resp.json()
    }

    pub fn logout(&self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        CreateRoleRequest, DeleteUserRequest, HttpMethod, ListSales, ListUsers,
    };
    use crate::request::mock::{MemoryTokenStore, MockHttpClient};
    use crate::EntityId;

    const BASE: &str = "http://api.test";

    fn client(tokens: MemoryTokenStore) -> ApiClient<MockHttpClient, MemoryTokenStore> {
        ApiClient::new(format!("{}/", BASE), MockHttpClient::new(), tokens)
    }

    #[test]
    fn base_url_is_normalized() {
        let c = client(MemoryTokenStore::default());
        assert_eq!(c.url("/api/users"), "http://api.test/api/users");
        assert_eq!(c.url("api/users"), "http://api.test/api/users");
    }

    #[tokio::test]
    async fn attaches_bearer_token_and_json_header() {
        let c = client(MemoryTokenStore::with_token("abc"));
        c.http.mock_response(
            HttpMethod::Get,
            "http://api.test/api/users",
            200,
            r#"[{"id":1,"name":"Ana","email":"ana@x.cl"}]"#,
        );

        let users = c.send(&ListUsers).await.unwrap();
        assert_eq!(users.len(), 1);

        let req = c.http.last_request().unwrap();
        assert_eq!(req.header("Authorization"), Some("Bearer abc"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.body, None);
    }

    #[tokio::test]
    async fn omits_authorization_without_token() {
        let c = client(MemoryTokenStore::default());
        c.http
            .mock_response(HttpMethod::Get, "http://api.test/api/ventas", 200, r#"{"data":[]}"#);

        let page = c.send(&ListSales).await.unwrap();
        assert!(page.data.is_empty());
        assert_eq!(c.http.last_request().unwrap().header("Authorization"), None);
    }

    #[tokio::test]
    async fn unauthorized_clears_token() {
        let c = client(MemoryTokenStore::with_token("expired"));
        c.http.mock_response(HttpMethod::Get, "http://api.test/api/users", 401, "");

        let err = c.send(&ListUsers).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(c.tokens().token(), None);
    }

    #[tokio::test]
    async fn server_errors_carry_message_or_fallback() {
        let c = client(MemoryTokenStore::with_token("t"));
        c.http.mock_response(
            HttpMethod::Post,
            "http://api.test/api/roles",
            409,
            r#"{"message":"El rol ya existe"}"#,
        );
        c.http
            .mock_response(HttpMethod::Delete, "http://api.test/api/users/3", 500, "oops");

        let err = c
            .send(&CreateRoleRequest {
                name: "Admin".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::server(409, "El rol ya existe"));
        assert_eq!(
            c.http.requests.borrow()[0].body.as_deref(),
            Some(r#"{"name":"Admin"}"#)
        );

        let err = c.send(&DeleteUserRequest { id: 3 }).await.unwrap_err();
        assert_eq!(err, ApiError::server(500, MSG_REQUEST_FAILED));
        // 非 401 失败不清除令牌
        assert_eq!(c.tokens().token().as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn delete_with_empty_body_succeeds() {
        let c = client(MemoryTokenStore::with_token("t"));
        c.http
            .mock_response(HttpMethod::Delete, "http://api.test/api/users/3", 204, "");

        let value = c.send(&DeleteUserRequest { id: 3 }).await.unwrap();
        assert!(value.is_null());
        assert_eq!(c.http.last_request().unwrap().body, None);
    }

    #[tokio::test]
    async fn network_failure_is_reported() {
        let c = client(MemoryTokenStore::with_token("t"));
        let err = c.send(&ListUsers).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn login_stores_token_without_sending_old_one() {
        let c = client(MemoryTokenStore::with_token("stale"));
        c.http.mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/login",
            200,
            r#"{"token":"fresh","user":{"id":1,"email":"a@b.cl"}}"#,
        );

        let auth = c.login("a@b.cl", "secret").await.unwrap();
        assert_eq!(auth.user.id, EntityId::Int(1));
        assert_eq!(c.tokens().token().as_deref(), Some("fresh"));

        let req = c.http.last_request().unwrap();
        assert_eq!(req.header("Authorization"), None);
        assert_eq!(
            req.body.as_deref(),
            Some(r#"{"email":"a@b.cl","password":"secret"}"#)
        );
    }

    #[tokio::test]
    async fn login_failure_uses_server_message_or_default() {
        let c = client(MemoryTokenStore::default());
        c.http.mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/login",
            401,
            r#"{"message":"Credenciales inválidas"}"#,
        );
        let err = c.login("a@b.cl", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), "Credenciales inválidas");
        assert_eq!(c.tokens().token(), None);

        c.http
            .mock_response(HttpMethod::Post, "http://api.test/api/auth/login", 500, "");
        let err = c.login("a@b.cl", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), MSG_LOGIN_FAILED);
    }

    #[tokio::test]
    async fn me_requires_token_and_clears_it_on_rejection() {
        let c = client(MemoryTokenStore::default());
        assert!(c.me().await.unwrap_err().is_unauthorized());
        assert!(c.http.requests.borrow().is_empty());

        let c = client(MemoryTokenStore::with_token("t"));
        c.http
            .mock_response(HttpMethod::Get, "http://api.test/api/auth/me", 403, "");
        assert!(c.me().await.unwrap_err().is_unauthorized());
        assert_eq!(c.tokens().token(), None);
    }

    #[tokio::test]
    async fn me_returns_current_user() {
        let c = client(MemoryTokenStore::with_token("t"));
        c.http.mock_response(
            HttpMethod::Get,
            "http://api.test/api/auth/me",
            200,
            r#"{"id":"u-1","email":"root@x.cl","name":"Root"}"#,
        );
        let me = c.me().await.unwrap();
        assert_eq!(me.display_name(), "Root");
        assert_eq!(
            c.http.last_request().unwrap().header("Authorization"),
            Some("Bearer t")
        );
    }

    #[test]
    fn logout_clears_token() {
        let c = client(MemoryTokenStore::with_token("t"));
        assert!(c.has_token());
        c.logout();
        assert!(!c.has_token());
    }
}
