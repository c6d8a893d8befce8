//! stale-while-revalidate 缓存
//!
//! 按请求路径保存最近一次成功的响应，并为每次请求发放递增的票据：
//! 同一路径上只有最新票据的结果会写入缓存，较早发出、较晚返回的响应被丢弃。

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// 一次请求的票据，由 [`SwrCache::begin_fetch`] 发放
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct SwrCache {
    entries: HashMap<String, Value>,
    /// 每个路径上最新发出且尚未完成的票据
    in_flight: HashMap<String, FetchTicket>,
    // 全局递增，clear 后也不复用，旧票据因此一律失效
    next_ticket: u64,
}

impl SwrCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取缓存值；结构不匹配时视为未命中
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// 登记一次请求
    ///
    /// 已有请求在途且未设置 `force` 时返回 `None`（去重）；
    /// `force` 时发放新票据，之前的在途请求随之过期。
    pub fn begin_fetch(&mut self, key: &str, force: bool) -> Option<FetchTicket> {
        if !force && self.in_flight.contains_key(key) {
            return None;
        }
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.in_flight.insert(key.to_string(), ticket);
        Some(ticket)
    }

    /// 该路径是否有请求在途
    pub fn is_fetching(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }

    fn settle(&mut self, key: &str, ticket: FetchTicket) -> bool {
        if self.in_flight.get(key) == Some(&ticket) {
            self.in_flight.remove(key);
            true
        } else {
            debug!(key, ?ticket, "stale response dropped");
            false
        }
    }

    /// 请求成功：仅当 `ticket` 仍是该路径的最新票据时写入缓存并返回 `true`
    pub fn complete<T: Serialize>(&mut self, key: &str, ticket: FetchTicket, value: &T) -> bool {
        if !self.settle(key, ticket) {
            return false;
        }
        match serde_json::to_value(value) {
            Ok(v) => {
                self.entries.insert(key.to_string(), v);
            }
            Err(e) => debug!(key, error = %e, "value not cacheable"),
        }
        true
    }

    /// 请求失败：释放在途标记，返回该失败是否仍需上报
    pub fn fail(&mut self, key: &str, ticket: FetchTicket) -> bool {
        self.settle(key, ticket)
    }

    /// 清空缓存（会话结束时）；在途请求的结果也将被丢弃
    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    const ROLES: &str = "/api/roles";

    fn role(name: &str) -> Vec<Role> {
        vec![Role {
            id: 4,
            name: name.into(),
            created_at: None,
        }]
    }

    #[test]
    fn stores_and_returns_typed_values() {
        let mut cache = SwrCache::new();
        assert_eq!(cache.get::<Vec<Role>>(ROLES), None);

        let ticket = cache.begin_fetch(ROLES, false).unwrap();
        assert!(cache.complete(ROLES, ticket, &role("Admin")));
        assert_eq!(cache.get::<Vec<Role>>(ROLES), Some(role("Admin")));
        // 结构不匹配只是未命中
        assert_eq!(cache.get::<String>(ROLES), None);
    }

    #[test]
    fn deduplicates_until_the_fetch_settles() {
        let mut cache = SwrCache::new();
        let first = cache.begin_fetch("/api/users", false).unwrap();
        assert_eq!(cache.begin_fetch("/api/users", false), None);

        assert!(cache.is_fetching("/api/users"));
        assert!(cache.fail("/api/users", first));
        assert!(!cache.is_fetching("/api/users"));
        assert!(cache.begin_fetch("/api/users", false).is_some());
    }

    #[test]
    fn forced_fetch_wins_over_slower_earlier_one() {
        let mut cache = SwrCache::new();
        let revalidate = cache.begin_fetch(ROLES, false).unwrap();
        let mutate = cache.begin_fetch(ROLES, true).unwrap();
        assert!(mutate > revalidate);

        // 写入后的新列表先返回
        assert!(cache.complete(ROLES, mutate, &role("Ventas")));
        // 写入前发出的旧请求后返回，被丢弃
        assert!(!cache.complete(ROLES, revalidate, &role("Soporte")));
        assert_eq!(cache.get::<Vec<Role>>(ROLES), Some(role("Ventas")));
    }

    #[test]
    fn early_settle_keeps_the_newer_fetch_in_flight() {
        let mut cache = SwrCache::new();
        let old = cache.begin_fetch(ROLES, false).unwrap();
        let new = cache.begin_fetch(ROLES, true).unwrap();

        assert!(!cache.complete(ROLES, old, &role("Soporte")));
        assert_eq!(cache.get::<Vec<Role>>(ROLES), None);
        // 新请求仍在途，普通重验证继续被去重
        assert_eq!(cache.begin_fetch(ROLES, false), None);

        assert!(cache.complete(ROLES, new, &role("Ventas")));
        assert!(cache.begin_fetch(ROLES, false).is_some());
    }

    #[test]
    fn failure_of_a_superseded_fetch_is_not_reported() {
        let mut cache = SwrCache::new();
        let old = cache.begin_fetch(ROLES, false).unwrap();
        let new = cache.begin_fetch(ROLES, true).unwrap();
        assert!(!cache.fail(ROLES, old));
        assert!(cache.fail(ROLES, new));
    }

    #[test]
    fn clear_discards_responses_started_before_it() {
        let mut cache = SwrCache::new();
        let ticket = cache.begin_fetch(ROLES, false).unwrap();
        cache.clear();

        assert!(!cache.complete(ROLES, ticket, &role("Admin")));
        assert_eq!(cache.get::<Vec<Role>>(ROLES), None);

        let fresh = cache.begin_fetch(ROLES, false).unwrap();
        assert!(fresh > ticket);
    }
}
