//! 由各列表接口数据汇总出的仪表盘指标

use crate::chart::ChartBar;
use crate::{Sale, Service, User};
use std::collections::HashMap;

pub const RECENT_USERS_LIMIT: usize = 5;
pub const TOP_SERVICES_LIMIT: usize = 5;

/// 按服务端顺序取前几个用户
pub fn recent_users(users: &[User]) -> Vec<User> {
    users.iter().take(RECENT_USERS_LIMIT).cloned().collect()
}

pub fn active_services(services: &[Service]) -> usize {
    services.iter().filter(|s| s.is_active()).count()
}

pub fn revenue(sales: &[Sale]) -> f64 {
    sales.iter().map(|s| s.amount).sum()
}

/// 按被销售记录引用的次数（按名称匹配）排序的服务
///
/// 次数相同时保持服务列表原顺序，因此没有任何销售时就是前几个计数为 0 的服务。
pub fn top_services(services: &[Service], sales: &[Sale]) -> Vec<ChartBar> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in sales.iter().filter_map(Sale::service_name) {
        *counts.entry(name).or_default() += 1;
    }

    let mut ranked: Vec<(usize, &Service)> = services
        .iter()
        .map(|s| (counts.get(s.name.as_str()).copied().unwrap_or(0), s))
        .collect();
    // 稳定排序，计数相同保持原顺序
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked
        .into_iter()
        .take(TOP_SERVICES_LIMIT)
        .map(|(count, s)| ChartBar::new(s.name.clone(), count as f64))
        .collect()
}
