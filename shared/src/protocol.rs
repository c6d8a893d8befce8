use crate::{AuthResponse, AuthUser, EntityId, PaymentMethod, Role, SalesPage, Service, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// API 请求使用的 HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 只有 POST 与 PUT 携带 JSON 请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// 定义单个接口的请求-响应关系与元数据
///
/// 放在路径中的标识标记为 `#[serde(skip)]`，不会出现在请求体里。
pub trait ApiRequest: Serialize {
    /// 该请求的响应类型
    type Response: DeserializeOwned;
    /// HTTP 方法
    const METHOD: HttpMethod;
    /// 相对于 API 基础地址的路径
    fn path(&self) -> String;
}

pub const PATH_LOGIN: &str = "/api/auth/login";
pub const PATH_ME: &str = "/api/auth/me";
pub const PATH_USERS: &str = "/api/users";
pub const PATH_ROLES: &str = "/api/roles";
pub const PATH_SERVICES: &str = "/api/servicios";
pub const PATH_SALES: &str = "/api/ventas";

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        PATH_LOGIN.to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = AuthUser;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        PATH_ME.to_string()
    }
}

// =========================================================
// 用户 (Users)
// =========================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListUsers;

impl ApiRequest for ListUsers {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        PATH_USERS.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role_id: i64,
    pub is_active: bool,
}

impl ApiRequest for CreateUserRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        PATH_USERS.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateUserRequest {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
}

impl ApiRequest for UpdateUserRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("{}/{}", PATH_USERS, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteUserRequest {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for DeleteUserRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("{}/{}", PATH_USERS, self.id)
    }
}

// =========================================================
// 角色 (Roles)
// =========================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListRoles;

impl ApiRequest for ListRoles {
    type Response = Vec<Role>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        PATH_ROLES.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRoleRequest {
    pub name: String,
}

impl ApiRequest for CreateRoleRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        PATH_ROLES.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRoleRequest {
    #[serde(skip)]
    pub id: i64,
    pub name: String,
}

impl ApiRequest for UpdateRoleRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("{}/{}", PATH_ROLES, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteRoleRequest {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for DeleteRoleRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("{}/{}", PATH_ROLES, self.id)
    }
}

// =========================================================
// 服务 (Services)
// =========================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListServices;

impl ApiRequest for ListServices {
    type Response = Vec<Service>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        PATH_SERVICES.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateServiceRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl ApiRequest for CreateServiceRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        PATH_SERVICES.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateServiceRequest {
    #[serde(skip)]
    pub id: EntityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ApiRequest for UpdateServiceRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Put;
    fn path(&self) -> String {
        format!("{}/{}", PATH_SERVICES, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteServiceRequest {
    #[serde(skip)]
    pub id: EntityId,
}

impl ApiRequest for DeleteServiceRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("{}/{}", PATH_SERVICES, self.id)
    }
}

// =========================================================
// 销售 (Sales)
// =========================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListSales;

impl ApiRequest for ListSales {
    type Response = SalesPage;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        PATH_SALES.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSaleRequest {
    #[serde(rename = "servicio_id")]
    pub service_id: EntityId,
    #[serde(rename = "monto")]
    pub amount: f64,
    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,
}

impl ApiRequest for CreateSaleRequest {
    type Response = Value;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        PATH_SALES.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_ids_are_not_serialized() {
        let req = UpdateRoleRequest {
            id: 4,
            name: "Soporte".into(),
        };
        assert_eq!(req.path(), "/api/roles/4");
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "name": "Soporte" }));

        let del = DeleteServiceRequest {
            id: EntityId::Text("abc".into()),
        };
        assert_eq!(del.path(), "/api/servicios/abc");
        assert_eq!(serde_json::to_value(&del).unwrap(), json!({}));
    }

    #[test]
    fn service_payload_omits_empty_price() {
        let req = CreateServiceRequest {
            name: "Corte".into(),
            price: None,
            active: true,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "nombre": "Corte", "activo": true })
        );
    }

    #[test]
    fn sale_payload_uses_wire_names() {
        let req = CreateSaleRequest {
            service_id: EntityId::Int(2),
            amount: 9990.0,
            payment_method: PaymentMethod::Tarjeta,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "servicio_id": 2, "monto": 9990.0, "metodo_pago": "tarjeta" })
        );
    }

    #[test]
    fn only_post_and_put_carry_bodies() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }
}
