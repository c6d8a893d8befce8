//! 浏览器端 API 客户端
//!
//! 把共享的 [`ApiClient`] 接到 `fetch` 与 sessionStorage 上，
//! 并在会话失效时同步认证状态。

use async_trait::async_trait;
use backoffice_shared::protocol::ApiRequest;
use backoffice_shared::request::{HttpClient, HttpRequest, HttpResponse};
use backoffice_shared::{
    ApiClient, ApiError, ApiResult, AuthResponse, AuthUser, TOKEN_STORAGE_KEY, TokenStore,
};
use leptos::prelude::*;

use crate::auth::AuthContext;
use crate::web::{Fetch, SessionStorage};

/// `fetch` 传输层
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHttpClient;

#[async_trait(?Send)]
impl HttpClient for WebHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = Fetch::request(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        Ok(HttpResponse::new(status, body))
    }
}

/// 令牌保存在 sessionStorage，关闭标签页即失效
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionTokenStore;

impl TokenStore for SessionTokenStore {
    fn token(&self) -> Option<String> {
        SessionStorage::get(TOKEN_STORAGE_KEY)
    }

    fn store(&self, token: &str) {
        SessionStorage::set(TOKEN_STORAGE_KEY, token);
    }

    fn clear(&self) {
        SessionStorage::delete(TOKEN_STORAGE_KEY);
    }
}

/// 面向页面的 API 客户端
///
/// 默认接在浏览器 `fetch` 与 sessionStorage 上；泛型参数只在测试中替换。
#[derive(Clone)]
pub struct AdminApi<C = WebHttpClient, S = SessionTokenStore> {
    client: ApiClient<C, S>,
    auth: AuthContext,
}

impl AdminApi {
    pub fn new(base_url: &str, auth: AuthContext) -> Self {
        Self::with_client(ApiClient::new(base_url, WebHttpClient, SessionTokenStore), auth)
    }
}

impl<C: HttpClient, S: TokenStore> AdminApi<C, S> {
    pub fn with_client(client: ApiClient<C, S>, auth: AuthContext) -> Self {
        Self { client, auth }
    }

    pub fn auth(&self) -> AuthContext {
        self.auth
    }

    pub fn has_token(&self) -> bool {
        self.client.has_token()
    }

    /// 发送需认证的请求；401 时令牌已被清除，这里再把状态切到 Anonymous，
    /// 路由守卫随即跳转到登录页。
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let result = self.client.send(req).await;
        if result.as_ref().is_err_and(ApiError::is_unauthorized) {
            self.auth.set_anonymous();
        }
        result
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        self.client.login(email, password).await
    }

    pub async fn me(&self) -> ApiResult<AuthUser> {
        self.client.me().await
    }

    pub fn logout(&self) {
        self.client.logout();
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> AdminApi {
    use_context::<AdminApi>().expect("AdminApi should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthStatus;
    use backoffice_shared::protocol::{HttpMethod, ListUsers};
    use backoffice_shared::request::mock::{MemoryTokenStore, MockHttpClient};
    use backoffice_shared::{EntityId, User};

    const BASE: &str = "http://api.test";

    fn signed_in(status: u16, body: &str) -> AdminApi<MockHttpClient, MemoryTokenStore> {
        let http = MockHttpClient::new();
        http.mock_response(HttpMethod::Get, "http://api.test/api/users", status, body);

        let auth = AuthContext::new();
        auth.set_authenticated(AuthUser {
            id: EntityId::Int(1),
            email: "admin@x.cl".into(),
            name: Some("Admin".into()),
        });
        AdminApi::with_client(ApiClient::new(BASE, http, MemoryTokenStore::with_token("t")), auth)
    }

    #[tokio::test]
    async fn rejected_session_signs_out() {
        let owner = Owner::new();
        owner.set();
        let api = signed_in(401, "");

        let err = api.send(&ListUsers).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(api.auth().status(), AuthStatus::Anonymous);
        assert!(!api.has_token());
    }

    #[tokio::test]
    async fn server_errors_keep_the_session() {
        let owner = Owner::new();
        owner.set();
        let api = signed_in(500, r#"{"message":"Error interno"}"#);

        let err = api.send(&ListUsers).await.unwrap_err();
        assert_eq!(err.to_string(), "Error interno");
        assert_eq!(api.auth().status(), AuthStatus::Authenticated);
        assert!(api.has_token());
    }

    #[tokio::test]
    async fn successful_requests_decode() {
        let owner = Owner::new();
        owner.set();
        let api = signed_in(200, r#"[{"id":3,"name":"Ana","email":"ana@x.cl"}]"#);

        let users: Vec<User> = api.send(&ListUsers).await.unwrap();
        assert_eq!(users[0].email, "ana@x.cl");
        assert_eq!(api.auth().status(), AuthStatus::Authenticated);
    }
}
