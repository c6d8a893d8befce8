//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的 `AuthStatus` 信号执行守卫，
//! 本模块只负责在每次导航时校验令牌并更新状态。

use backoffice_shared::request::HttpClient;
use backoffice_shared::{ApiResult, AuthUser, TokenStore};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::{debug, info};

use crate::api::{AdminApi, use_api};
use crate::web::router::use_router;

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// 正在向 `/me` 确认令牌
    Checking,
    Authenticated,
    Anonymous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub status: AuthStatus,
    /// 当前登录用户（仅在 Authenticated 时存在）
    pub user: Option<AuthUser>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            status: AuthStatus::Checking,
            user: None,
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
    /// 会话代数：每次切换到 Anonymous 递增，用来识别注销前发出的校验
    session: StoredValue<u64>,
}

impl AuthContext {
    /// 创建新的认证上下文，初始为 Checking
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self {
            state,
            set_state,
            session: StoredValue::new(0),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn status_signal(&self) -> Signal<AuthStatus> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.status))
    }

    pub fn user_signal(&self) -> Signal<Option<AuthUser>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    pub fn status(&self) -> AuthStatus {
        self.state.with_untracked(|s| s.status)
    }

    // 状态不变时不写入，避免触发无谓的守卫重算
    fn apply(&self, next: AuthState) {
        if self.state.with_untracked(|s| *s != next) {
            self.set_state.set(next);
        }
    }

    pub fn set_checking(&self) {
        self.apply(AuthState::default());
    }

    pub fn set_authenticated(&self, user: AuthUser) {
        self.apply(AuthState {
            status: AuthStatus::Authenticated,
            user: Some(user),
        });
    }

    /// 当前会话代数
    pub fn session(&self) -> u64 {
        self.session.get_value()
    }

    /// 仅当会话代数未变时确认登录，返回是否生效
    pub fn confirm(&self, session: u64, user: AuthUser) -> bool {
        if self.session() != session {
            return false;
        }
        self.set_authenticated(user);
        true
    }

    pub fn set_anonymous(&self) {
        self.session.update_value(|s| *s += 1);
        self.apply(AuthState {
            status: AuthStatus::Anonymous,
            user: None,
        });
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 一次导航对会话要做的处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    /// 没有令牌：直接视为匿名，不发请求
    Anonymous,
    /// 有令牌但尚未确认：显示加载动画并请求 `/me`
    Verify,
    /// 已确认：后台静默请求 `/me`
    Revalidate,
}

impl SessionCheck {
    pub fn plan(has_token: bool, status: AuthStatus) -> Self {
        match (has_token, status) {
            (false, _) => SessionCheck::Anonymous,
            (true, AuthStatus::Authenticated) => SessionCheck::Revalidate,
            (true, _) => SessionCheck::Verify,
        }
    }
}

/// 校验当前令牌并同步认证状态
///
/// 请求期间若发生注销，返回的结果作废，不会把已注销的标签页切回已认证。
pub async fn check_session<C: HttpClient, S: TokenStore>(api: &AdminApi<C, S>) {
    let ctx = api.auth();
    let session = ctx.session();
    let plan = SessionCheck::plan(api.has_token(), ctx.status());
    debug!(?plan, "session check");

    match plan {
        SessionCheck::Anonymous => ctx.set_anonymous(),
        SessionCheck::Verify | SessionCheck::Revalidate => {
            if plan == SessionCheck::Verify {
                ctx.set_checking();
            }
            match api.me().await {
                Ok(user) => {
                    if !ctx.confirm(session, user) {
                        debug!("session ended during check, result dropped");
                    }
                }
                Err(_) if ctx.session() != session => {
                    debug!("session ended during check, result dropped");
                }
                Err(e) => {
                    info!(error = %e, "session no longer valid");
                    ctx.set_anonymous();
                }
            }
        }
    }
}

/// 登录：成功后令牌已写入 sessionStorage，状态切换为 Authenticated
///
/// 导航由路由服务的认证状态监听自动处理。
pub async fn login(api: &AdminApi, email: &str, password: &str) -> ApiResult<AuthUser> {
    let auth = api.login(email, password).await?;
    info!(email = %auth.user.email, "logged in");
    api.auth().set_authenticated(auth.user.clone());
    Ok(auth.user)
}

/// 注销并清除状态
pub fn logout(api: &AdminApi) {
    api.logout();
    api.auth().set_anonymous();
    info!("logged out");
}

/// 在每次路由变化时校验会话
#[component]
pub fn AuthProvider() -> impl IntoView {
    let api = use_api();
    let router = use_router();

    Effect::new(move |_| {
        let route = router.current_route().get();
        debug!(%route, "route changed");
        let api = api.clone();
        spawn_local(async move {
            check_session(&api).await;
        });
    });
}
