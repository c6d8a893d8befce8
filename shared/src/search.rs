//! 列表页的前端全文过滤
//!
//! 任一可搜索字段包含关键词（忽略大小写）即视为匹配，空关键词匹配全部。

use crate::{Role, Sale, Service, User};
use std::borrow::Cow;

pub trait Searchable {
    /// 搜索框检索的字段
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    fn matches(&self, term: &SearchTerm) -> bool {
        term.is_empty()
            || self
                .search_fields()
                .into_iter()
                .any(|field| field.to_lowercase().contains(term.as_str()))
    }
}

/// 转为小写的搜索词
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 按原顺序克隆出匹配 `term` 的记录
pub fn filter<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    let term = SearchTerm::new(term);
    items.iter().filter(|i| i.matches(&term)).cloned().collect()
}

impl Searchable for User {
    // 与“Nombre”列一致，按名 + 姓检索
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.email.as_str()), Cow::Owned(self.full_name())]
    }
}

impl Searchable for Role {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name.as_str())]
    }
}

impl Searchable for Service {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.name.as_str())]
    }
}

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![self.payment_method.as_str()];
        fields.extend(self.service_name());
        if let Some(user) = &self.user {
            fields.extend(user.name.as_deref());
            fields.extend(user.email.as_deref());
        }
        fields.into_iter().map(Cow::Borrowed).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityId, SaleService, SaleUser};

    fn user(name: &str, email: &str) -> User {
        User {
            id: 1,
            name: name.into(),
            last_name: None,
            email: email.into(),
            role_id: None,
            is_active: true,
            created_at: None,
            role: None,
        }
    }

    fn sale(service: Option<&str>, method: &str, customer: Option<(&str, &str)>) -> Sale {
        Sale {
            id: EntityId::Int(1),
            service: service.map(|s| SaleService {
                name: Some(s.into()),
            }),
            amount: 1000.0,
            payment_method: method.into(),
            user: customer.map(|(n, e)| SaleUser {
                name: Some(n.into()),
                email: Some(e.into()),
            }),
            created_at: String::new(),
        }
    }

    #[test]
    fn empty_term_keeps_everything() {
        let users = vec![user("Ana", "ana@x.cl"), user("", "bob@x.cl")];
        assert_eq!(filter(&users, "").len(), 2);
    }

    #[test]
    fn users_match_email_or_name_ignoring_case() {
        let users = vec![user("Ana Pérez", "ana@x.cl"), user("", "BOB@x.cl")];
        assert_eq!(filter(&users, "PÉREZ").len(), 1);
        assert_eq!(filter(&users, "bob").len(), 1);
        assert_eq!(filter(&users, "x.cl").len(), 2);
        assert!(filter(&users, "zzz").is_empty());
    }

    #[test]
    fn users_match_last_name_and_full_name() {
        let users = vec![
            User {
                last_name: Some("Pérez".into()),
                ..user("Ana", "ana@x.cl")
            },
            user("Bruno", "bruno@x.cl"),
        ];
        assert_eq!(filter(&users, "pérez").len(), 1);
        assert_eq!(filter(&users, "ana pér").len(), 1);
        assert_eq!(filter(&users, "bruno").len(), 1);
    }

    #[test]
    fn sales_match_service_method_and_customer() {
        let sales = vec![
            sale(Some("Lavado"), "efectivo", Some(("Carla", "carla@x.cl"))),
            sale(None, "tarjeta", None),
        ];
        assert_eq!(filter(&sales, "lava").len(), 1);
        assert_eq!(filter(&sales, "TARJ").len(), 1);
        assert_eq!(filter(&sales, "carla@").len(), 1);
        assert!(filter(&sales, "anon").is_empty());
    }

    #[test]
    fn filter_preserves_order() {
        let roles = vec![
            Role {
                id: 2,
                name: "Admin".into(),
                created_at: None,
            },
            Role {
                id: 1,
                name: "Administrativo".into(),
                created_at: None,
            },
        ];
        let ids: Vec<i64> = filter(&roles, "admin").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
