//! 针对运行中 API 的冒烟测试
//!
//! 默认忽略，运行方式：
//! `BACKOFFICE_API_URL=... BACKOFFICE_EMAIL=... BACKOFFICE_PASSWORD=... cargo test -p backoffice-shared -- --ignored`.

use backoffice_shared::protocol::{HttpMethod, ListRoles, ListServices, ListUsers};
use backoffice_shared::request::{HttpClient, HttpRequest, HttpResponse};
use backoffice_shared::{ApiClient, ApiError, ApiResult, TokenStore};
use std::cell::RefCell;

struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);
        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[derive(Default)]
struct Tokens(RefCell<Option<String>>);

impl TokenStore for Tokens {
    fn token(&self) -> Option<String> {
        self.0.borrow().clone()
    }
    fn store(&self, token: &str) {
        *self.0.borrow_mut() = Some(token.to_string());
    }
    fn clear(&self) {
        *self.0.borrow_mut() = None;
    }
}

fn env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| panic!("{} must be set", key))
}

#[tokio::test]
#[ignore]
async fn login_and_list_resources() {
    let client = ApiClient::new(
        env("BACKOFFICE_API_URL"),
        ReqwestHttpClient {
            client: reqwest::Client::new(),
        },
        Tokens::default(),
    );

    let auth = client
        .login(&env("BACKOFFICE_EMAIL"), &env("BACKOFFICE_PASSWORD"))
        .await
        .expect("login");
    assert!(client.has_token());

    let me = client.me().await.expect("me");
    assert_eq!(me.email, auth.user.email);

    client.send(&ListUsers).await.expect("users");
    client.send(&ListRoles).await.expect("roles");
    client.send(&ListServices).await.expect("services");

    client.logout();
    assert!(client.me().await.unwrap_err().is_unauthorized());
}
