//! 后台布局：侧边栏 + 顶栏 + 内容区
//!
//! 会话确认之前显示全屏加载动画，内容只在已认证时挂载。

use backoffice_shared::DEFAULT_USER_LABEL;
use leptos::prelude::*;

use crate::api::use_api;
use crate::auth::{AuthStatus, logout, use_auth};
use crate::components::icons::{
    Briefcase, LayoutDashboard, LogOut, Shield, ShoppingCart, UsersIcon,
};
use crate::web::route::{AppRoute, NAVIGATION};
use crate::web::router::Link;

#[component]
pub fn FullScreenSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

fn nav_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Users => view! { <UsersIcon attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Roles => view! { <Shield attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Services => view! { <Briefcase attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Sales => view! { <ShoppingCart attr:class="h-5 w-5" /> }.into_any(),
        _ => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
    }
}

#[component]
fn Sidebar(active: AppRoute) -> impl IntoView {
    let api = use_api();
    let on_logout = move |_| logout(&api);

    view! {
        <aside class="w-64 min-h-screen bg-base-100 border-r border-base-300 flex flex-col">
            <div class="p-6">
                <h2 class="text-xl font-bold">"Admin Panel"</h2>
            </div>
            <ul class="menu flex-1 px-4 gap-1 w-full">
                {NAVIGATION
                    .into_iter()
                    .map(|route| {
                        let class = if route == active { "active" } else { "" };
                        view! {
                            <li>
                                <Link to=route class={class.to_string()}>
                                    {nav_icon(route)}
                                    {route.title()}
                                </Link>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="p-4 border-t border-base-300">
                <button class="btn btn-ghost w-full justify-start gap-2" on:click=on_logout>
                    <LogOut attr:class="h-5 w-5" />
                    "Cerrar Sesión"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn Header() -> impl IntoView {
    let user = use_auth().user_signal();

    let name = move || {
        user.with(|u| {
            u.as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| DEFAULT_USER_LABEL.to_string())
        })
    };
    let email = move || user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    view! {
        <header class="navbar bg-base-100 border-b border-base-300 px-8">
            <div class="flex-1"></div>
            <div class="flex-none text-right">
                <div class="font-medium">{name}</div>
                <div class="text-xs text-base-content/60">{email}</div>
            </div>
        </header>
    }
}

/// 受保护页面的外框
#[component]
pub fn AppLayout(active: AppRoute, children: ChildrenFn) -> impl IntoView {
    let status = use_auth().status_signal();

    view! {
        <Show
            when=move || status.get() == AuthStatus::Authenticated
            fallback=|| view! { <FullScreenSpinner /> }
        >
            <div class="flex min-h-screen bg-base-200">
                <Sidebar active=active />
                <div class="flex-1 flex flex-col">
                    <Header />
                    <main class="flex-1 p-8 space-y-6">{children()}</main>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"Página no encontrada"</p>
                <Link to=AppRoute::Dashboard class={"btn btn-primary".to_string()}>
                    "Volver al inicio"
                </Link>
            </div>
        </div>
    }
}
