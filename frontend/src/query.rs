//! stale-while-revalidate 数据钩子
//!
//! `use_query` 先渲染共享缓存中该请求路径的数据，再在后台重新获取。
//! 同一路径上任一查询拿到新响应，所有监听该路径的查询都会同步。

use backoffice_shared::ApiError;
use backoffice_shared::cache::{FetchTicket, SwrCache};
use backoffice_shared::protocol::ApiRequest;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::api::{AdminApi, use_api};
use crate::auth::AuthStatus;
use crate::toast::{Toaster, use_toaster};

/// 全局响应缓存
#[derive(Clone, Copy)]
pub struct QueryCache {
    store: StoredValue<SwrCache>,
    /// 每次写入或请求结束时递增，监听中的查询据此重新读取
    revision: RwSignal<u64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            store: StoredValue::new(SwrCache::new()),
            revision: RwSignal::new(0),
        }
    }

    fn bump(&self) {
        self.revision.update(|r| *r += 1);
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.store.with_value(|c| c.get(key))
    }

    fn is_fetching(&self, key: &str) -> bool {
        self.store.with_value(|c| c.is_fetching(key))
    }

    fn begin_fetch(&self, key: &str, force: bool) -> Option<FetchTicket> {
        self.store
            .try_update_value(|c| c.begin_fetch(key, force))
            .flatten()
    }

    fn complete<T: Serialize>(&self, key: &str, ticket: FetchTicket, value: &T) -> bool {
        let fresh = self
            .store
            .try_update_value(|c| c.complete(key, ticket, value))
            .unwrap_or(false);
        if fresh {
            self.bump();
        }
        fresh
    }

    fn fail(&self, key: &str, ticket: FetchTicket) -> bool {
        let fresh = self
            .store
            .try_update_value(|c| c.fail(key, ticket))
            .unwrap_or(false);
        if fresh {
            self.bump();
        }
        fresh
    }

    /// 清空所有缓存响应，在途请求的结果也会被丢弃
    pub fn clear(&self) {
        self.store.update_value(SwrCache::clear);
        self.bump();
    }

    /// 会话结束（主动注销或 401）时清空，避免下一个会话看到上一个会话的列表
    pub fn on_session_change(&self, status: AuthStatus) {
        if status == AuthStatus::Anonymous {
            debug!("session ended, dropping cached responses");
            self.clear();
        }
    }

    /// 跟随认证状态
    pub fn follow_session(self, status: Signal<AuthStatus>) {
        Effect::new(move |_| self.on_session_change(status.get()));
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_query_cache() -> QueryCache {
    use_context::<QueryCache>().expect("QueryCache should be provided")
}

/// 获取失败时要弹出的提示；401 由路由守卫跳转登录页，不再提示
fn failure_message(error: &ApiError) -> Option<String> {
    (!error.is_unauthorized()).then(|| error.to_string())
}

pub struct Query<R: ApiRequest + Send + Sync + 'static>
where
    R::Response: Send + Sync + 'static,
{
    pub data: RwSignal<Option<R::Response>>,
    pub error: RwSignal<Option<ApiError>>,
    pub validating: RwSignal<bool>,
    request: StoredValue<R>,
    api: StoredValue<AdminApi>,
    cache: QueryCache,
    toaster: Toaster,
}

impl<R: ApiRequest + Send + Sync + 'static> Clone for Query<R>
where
    R::Response: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ApiRequest + Send + Sync + 'static> Copy for Query<R> where R::Response: Send + Sync + 'static {}

impl<R> Query<R>
where
    R: ApiRequest + Clone + Send + Sync + 'static,
    R::Response: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn key(&self) -> String {
        self.request.with_value(|r| r.path())
    }

    /// 尚无数据且正在请求
    pub fn is_loading(&self) -> bool {
        self.data.with(Option::is_none) && self.validating.get()
    }

    /// 重新获取；同一路径已有请求在途时跳过
    pub fn revalidate(&self) {
        self.fetch(false);
    }

    /// 写操作之后强制重新获取，先前在途的请求结果作废
    pub fn mutate(&self) {
        self.fetch(true);
    }

    fn fetch(&self, force: bool) {
        let key = self.key();
        let Some(ticket) = self.cache.begin_fetch(&key, force) else {
            debug!(%key, "fetch already in flight");
            return;
        };

        self.validating.set(true);
        let this = *self;
        let api = self.api.get_value();
        let request = self.request.get_value();

        spawn_local(async move {
            match api.send(&request).await {
                Ok(value) => {
                    if this.cache.complete(&key, ticket, &value) {
                        this.data.set(Some(value));
                        this.error.set(None);
                    }
                }
                Err(e) => {
                    if this.cache.fail(&key, ticket) {
                        warn!(%key, error = %e, "fetch failed");
                        if let Some(message) = failure_message(&e) {
                            this.toaster.error(message);
                        }
                        this.error.set(Some(e));
                    }
                }
            }
            // 被更新的请求取代时仍保持 validating，直到那个请求结束
            this.validating.set(this.cache.is_fetching(&key));
        });
    }
}

/// 绑定共享缓存并立即发起一次重验证
pub fn use_query<R>(request: R) -> Query<R>
where
    R: ApiRequest + Clone + Send + Sync + 'static,
    R::Response: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let query = use_lazy_query(request);
    query.revalidate();
    query
}

/// 同 [`use_query`]，但等到第一次显式 `revalidate` 才请求
pub fn use_lazy_query<R>(request: R) -> Query<R>
where
    R: ApiRequest + Clone + Send + Sync + 'static,
    R::Response: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let cache = use_query_cache();
    let key = request.path();

    let query = Query {
        data: RwSignal::new(cache.get::<R::Response>(&key)),
        error: RwSignal::new(None),
        validating: RwSignal::new(false),
        request: StoredValue::new(request),
        api: StoredValue::new(use_api()),
        cache,
        toaster: use_toaster(),
    };

    // 其他查询写入同一路径或请求结束时同步
    Effect::new(move |prev: Option<u64>| {
        let revision = cache.revision.get();
        if prev.is_some_and(|p| p != revision) {
            if let Some(value) = cache.get::<R::Response>(&key) {
                query.data.set(Some(value));
            }
            query.validating.set(cache.is_fetching(&key));
        }
        revision
    });

    let focus = window_event_listener(ev::focus, move |_| query.revalidate());
    on_cleanup(move || focus.remove());

    query
}

/// 执行写请求，并以 toast 报告结果
#[derive(Clone, Copy)]
pub struct Mutator {
    api: StoredValue<AdminApi>,
    toaster: Toaster,
}

pub fn use_mutator() -> Mutator {
    Mutator {
        api: StoredValue::new(use_api()),
        toaster: use_toaster(),
    }
}

impl Mutator {
    /// 请求期间 `pending` 为 true；成功提示之后执行 `on_success`
    /// （关闭对话框、对列表调用 `mutate`）。
    pub fn run<R>(
        &self,
        request: R,
        pending: RwSignal<bool>,
        success: (String, String),
        on_success: impl FnOnce() + 'static,
    ) where
        R: ApiRequest + 'static,
    {
        let api = self.api.get_value();
        let toaster = self.toaster;
        pending.set(true);

        spawn_local(async move {
            match api.send(&request).await {
                Ok(_) => {
                    let (title, description) = success;
                    toaster.success(title, description);
                    on_success();
                }
                Err(e) => toaster.error(e.to_string()),
            }
            pending.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_shared::Role;

    fn roles(name: &str) -> Vec<Role> {
        vec![Role {
            id: 4,
            name: name.into(),
            created_at: None,
        }]
    }

    #[test]
    fn failures_are_reported_except_expired_sessions() {
        assert_eq!(failure_message(&ApiError::Unauthorized), None);
        assert_eq!(
            failure_message(&ApiError::server(500, "Error en la petición")).as_deref(),
            Some("Error en la petición")
        );
        assert!(failure_message(&ApiError::Network("offline".into())).is_some());
        assert!(failure_message(&ApiError::Decode("bad json".into())).is_some());
    }

    #[test]
    fn stale_revalidate_does_not_overwrite_mutation() {
        let owner = Owner::new();
        owner.set();
        let cache = QueryCache::new();

        let revalidate = cache.begin_fetch("/api/roles", false).unwrap();
        let mutate = cache.begin_fetch("/api/roles", true).unwrap();
        assert!(cache.complete("/api/roles", mutate, &roles("Ventas")));
        assert!(!cache.complete("/api/roles", revalidate, &roles("Soporte")));

        assert_eq!(cache.get::<Vec<Role>>("/api/roles"), Some(roles("Ventas")));
        assert!(!cache.is_fetching("/api/roles"));
    }

    #[test]
    fn watchers_are_notified_only_by_fresh_results() {
        let owner = Owner::new();
        owner.set();
        let cache = QueryCache::new();
        let start = cache.revision.get_untracked();

        let old = cache.begin_fetch("/api/users", false).unwrap();
        let new = cache.begin_fetch("/api/users", true).unwrap();
        assert!(!cache.fail("/api/users", old));
        assert_eq!(cache.revision.get_untracked(), start);

        assert!(cache.fail("/api/users", new));
        assert_eq!(cache.revision.get_untracked(), start + 1);
    }

    #[test]
    fn sign_out_drops_cached_lists() {
        let owner = Owner::new();
        owner.set();
        let cache = QueryCache::new();
        let ticket = cache.begin_fetch("/api/roles", false).unwrap();
        assert!(cache.complete("/api/roles", ticket, &roles("Admin")));

        cache.on_session_change(AuthStatus::Authenticated);
        assert!(cache.get::<Vec<Role>>("/api/roles").is_some());

        let late = cache.begin_fetch("/api/roles", false).unwrap();
        cache.on_session_change(AuthStatus::Anonymous);
        assert_eq!(cache.get::<Vec<Role>>("/api/roles"), None);
        // 注销前发出的请求，结果不会写回
        assert!(!cache.complete("/api/roles", late, &roles("Admin")));
    }
}
