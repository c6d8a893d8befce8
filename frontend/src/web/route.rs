//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

use crate::auth::AuthStatus;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 控制面板 (默认路由)
    #[default]
    Dashboard,
    Users,
    Roles,
    Services,
    Sales,
    /// 页面未找到
    NotFound,
}

/// 侧边栏顺序
pub const NAVIGATION: [AppRoute; 5] = [
    AppRoute::Dashboard,
    AppRoute::Users,
    AppRoute::Roles,
    AppRoute::Services,
    AppRoute::Sales,
];

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "" | "/dashboard" => Self::Dashboard,
            "/login" => Self::Login,
            "/users" => Self::Users,
            "/roles" => Self::Roles,
            "/services" => Self::Services,
            "/ventas" => Self::Sales,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Users => "/users",
            Self::Roles => "/roles",
            Self::Services => "/services",
            Self::Sales => "/ventas",
            Self::NotFound => "/404",
        }
    }

    /// 侧边栏文案
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Iniciar Sesión",
            Self::Dashboard => "Dashboard",
            Self::Users => "Usuarios",
            Self::Roles => "Roles",
            Self::Services => "Servicios",
            Self::Sales => "Ventas",
            Self::NotFound => "No encontrado",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 守卫判定：返回需要重定向到的路由，`None` 表示放行。
    ///
    /// 会话仍在校验时不做跳转，布局显示加载动画直到状态确定。
    pub fn guard(&self, status: AuthStatus) -> Option<AppRoute> {
        match status {
            AuthStatus::Checking => None,
            AuthStatus::Anonymous if self.requires_auth() => Some(Self::auth_failure_redirect()),
            AuthStatus::Authenticated if self.should_redirect_when_authenticated() => {
                Some(Self::auth_success_redirect())
            }
            _ => None,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/users/"), AppRoute::Users);
        assert_eq!(AppRoute::from_path("/ventas"), AppRoute::Sales);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn paths_round_trip_for_navigation() {
        for route in NAVIGATION {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
            assert!(route.requires_auth());
        }
        assert_eq!(AppRoute::from_path(AppRoute::Login.to_path()), AppRoute::Login);
    }

    #[test]
    fn anonymous_users_are_sent_to_login() {
        assert_eq!(AppRoute::Users.guard(AuthStatus::Anonymous), Some(AppRoute::Login));
        assert_eq!(AppRoute::Login.guard(AuthStatus::Anonymous), None);
        assert_eq!(AppRoute::NotFound.guard(AuthStatus::Anonymous), None);
    }

    #[test]
    fn authenticated_users_skip_login() {
        assert_eq!(
            AppRoute::Login.guard(AuthStatus::Authenticated),
            Some(AppRoute::Dashboard)
        );
        assert_eq!(AppRoute::Sales.guard(AuthStatus::Authenticated), None);
    }

    #[test]
    fn checking_never_redirects() {
        assert_eq!(AppRoute::Users.guard(AuthStatus::Checking), None);
        assert_eq!(AppRoute::Login.guard(AuthStatus::Checking), None);
    }
}
