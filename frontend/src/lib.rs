//! Backoffice 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api` / `query`: API 客户端与 SWR 数据钩子
//! - `components`: UI 组件层

mod api;
mod auth;
pub mod logging;
mod query;
mod toast;
mod components {
    pub mod common;
    pub mod dashboard;
    pub mod icons;
    pub mod layout;
    pub mod login;
    pub mod modal;
    pub mod roles;
    pub mod sales;
    pub mod services;
    pub mod users;
}

use backoffice_shared::config::ClientConfig;
use leptos::prelude::*;

use crate::api::AdminApi;
use crate::auth::{AuthContext, AuthProvider};
use crate::components::dashboard::DashboardPage;
use crate::components::layout::{AppLayout, NotFoundPage};
use crate::components::login::LoginPage;
use crate::components::roles::RolesPage;
use crate::components::sales::SalesPage;
use crate::components::services::ServicesPage;
use crate::components::users::UsersPage;
use crate::query::QueryCache;
use crate::toast::{ToastViewport, Toaster};

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::Fetch;
    pub use storage::SessionStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 构建期注入的配置
pub fn client_config() -> ClientConfig {
    ClientConfig::new(
        option_env!("BACKOFFICE_API_URL"),
        option_env!("BACKOFFICE_LOG"),
    )
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，受保护页面包在后台布局中。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = move || match route {
        AppRoute::Users => view! { <UsersPage /> }.into_any(),
        AppRoute::Roles => view! { <RolesPage /> }.into_any(),
        AppRoute::Services => view! { <ServicesPage /> }.into_any(),
        AppRoute::Sales => view! { <SalesPage /> }.into_any(),
        _ => view! { <DashboardPage /> }.into_any(),
    };

    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
        _ => view! { <AppLayout active=route>{page()}</AppLayout> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = client_config();

    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. API 客户端、响应缓存与通知
    provide_context(AdminApi::new(&config.api_url, auth_ctx));
    provide_context(Toaster::new());

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let auth_status = auth_ctx.status_signal();

    // 会话结束时清空响应缓存
    let cache = QueryCache::new();
    cache.follow_session(auth_status);
    provide_context(cache);

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router auth_status=auth_status>
            <AuthProvider />
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastViewport />
    }
}
