use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cache;
pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod protocol;
pub mod request;
pub mod search;

pub use client::{ApiClient, TokenStore};
pub use error::{ApiError, ApiResult};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// sessionStorage 中保存令牌的键
pub const TOKEN_STORAGE_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 没有姓名或角色时的占位文案
pub const DEFAULT_USER_LABEL: &str = "Usuario";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// API 返回的记录标识
///
/// 部分资源使用数字 id，部分使用不透明字符串，两种形式都原样接收并原样写回。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::Int(0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(id) => write!(f, "{}", id),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Int(id)
    }
}

/// 当前会话对应的账号，即 `/api/auth/me` 的返回值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: EntityId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthUser {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, alias = "nombre")]
    pub name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub role: Option<RoleRef>,
}

impl User {
    /// 名 + 姓；都为空时返回空串
    pub fn full_name(&self) -> String {
        let last = self.last_name.as_deref().unwrap_or("").trim();
        let first = self.name.trim();
        match (first.is_empty(), last.is_empty()) {
            (true, true) => String::new(),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (false, false) => format!("{} {}", first, last),
        }
    }

    pub fn role_label(&self) -> &str {
        self.role
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or(DEFAULT_USER_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// 可销售的服务，线上字段名为西班牙语
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
}

impl Service {
    /// 未显式标记的服务视为启用
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleService {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: EntityId,
    #[serde(rename = "servicio", default)]
    pub service: Option<SaleService>,
    #[serde(rename = "monto", default)]
    pub amount: f64,
    #[serde(rename = "metodo_pago", default)]
    pub payment_method: String,
    #[serde(rename = "usuario", default)]
    pub user: Option<SaleUser>,
    #[serde(rename = "creado_en", default)]
    pub created_at: String,
}

impl Sale {
    pub fn service_name(&self) -> Option<&str> {
        self.service.as_ref().and_then(|s| s.name.as_deref())
    }

    pub fn customer_label(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or("Anon")
    }
}

/// `/api/ventas` 把记录包在 `data` 信封中
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesPage {
    #[serde(default)]
    pub data: Vec<Sale>,
}

/// 非 2xx 响应时 API 返回的错误体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Efectivo,
    Tarjeta,
    Transferencia,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Efectivo,
        PaymentMethod::Tarjeta,
        PaymentMethod::Transferencia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Tarjeta => "tarjeta",
            PaymentMethod::Transferencia => "transferencia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Tarjeta => "Tarjeta",
            PaymentMethod::Transferencia => "Transferencia",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_id_accepts_numbers_and_strings() {
        let n: EntityId = serde_json::from_value(json!(7)).unwrap();
        let s: EntityId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, EntityId::Int(7));
        assert_eq!(s, EntityId::Text("a1b2".into()));
        assert_eq!(n.to_string(), "7");
        assert_eq!(serde_json::to_value(&s).unwrap(), json!("a1b2"));
        // 带前导零的字符串 id 原样写回
        let padded: EntityId = serde_json::from_value(json!("0042")).unwrap();
        assert_eq!(serde_json::to_value(&padded).unwrap(), json!("0042"));
    }

    #[test]
    fn user_decodes_api_shape() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "name": "Ana",
            "last_name": null,
            "email": "ana@example.cl",
            "role_id": 2,
            "is_active": false,
            "created_at": "2024-03-05T10:00:00Z",
            "role": { "id": 2, "name": "Admin" }
        }))
        .unwrap();

        assert_eq!(user.full_name(), "Ana");
        assert_eq!(user.role_label(), "Admin");
        assert!(!user.is_active);
    }

    #[test]
    fn user_tolerates_legacy_field_names() {
        let user: User = serde_json::from_value(json!({
            "id": 9,
            "nombre": "Luis",
            "email": "luis@example.cl",
            "createdAt": "2024-01-01"
        }))
        .unwrap();

        assert_eq!(user.name, "Luis");
        assert_eq!(user.created_at.as_deref(), Some("2024-01-01"));
        assert_eq!(user.role_label(), DEFAULT_USER_LABEL);
        assert!(user.is_active);
    }

    #[test]
    fn service_uses_spanish_wire_names() {
        let service: Service = serde_json::from_value(json!({
            "id": "srv-1",
            "nombre": "Lavado",
            "precio": 15000.0
        }))
        .unwrap();

        assert_eq!(service.name, "Lavado");
        assert_eq!(service.price, Some(15000.0));
        assert!(service.is_active());
    }

    #[test]
    fn sale_labels_fall_back() {
        let sale: Sale = serde_json::from_value(json!({
            "id": 1,
            "monto": 5000,
            "metodo_pago": "tarjeta",
            "creado_en": "2024-03-05T14:30:00Z"
        }))
        .unwrap();

        assert_eq!(sale.customer_label(), "Anon");
        assert_eq!(sale.service_name(), None);
    }

    #[test]
    fn payment_method_parse_is_case_insensitive() {
        assert_eq!(PaymentMethod::parse("Tarjeta"), Some(PaymentMethod::Tarjeta));
        assert_eq!(PaymentMethod::parse("cheque"), None);
        assert_eq!(
            serde_json::to_value(PaymentMethod::Transferencia).unwrap(),
            json!("transferencia")
        );
    }

    #[test]
    fn auth_user_display_name_prefers_name() {
        let mut user = AuthUser {
            id: EntityId::Int(1),
            email: "root@example.cl".into(),
            name: Some("Root".into()),
        };
        assert_eq!(user.display_name(), "Root");
        user.name = Some("  ".into());
        assert_eq!(user.display_name(), "root@example.cl");
    }
}
