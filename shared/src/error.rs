//! 客户端错误类型
//!
//! 对远端 API 的每次调用失败都归结为 [`ApiError`]，
//! 其 `Display` 输出即 toast 中展示给操作员的文案。

use thiserror::Error;

pub const MSG_UNAUTHORIZED: &str = "No autorizado";
pub const MSG_REQUEST_FAILED: &str = "Error en la petición";
pub const MSG_LOGIN_FAILED: &str = "Error al iniciar sesión";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// API 返回 401，或根本没有会话令牌
    #[error("No autorizado")]
    Unauthorized,
    /// 其他非 2xx 状态，携带服务端给出的消息
    #[error("{message}")]
    Server { status: u16, message: String },
    /// 请求没有得到任何响应
    #[error("Error de red: {0}")]
    Network(String),
    /// 请求体无法编码或响应无法解析
    #[error("Respuesta inválida: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_user_facing() {
        assert_eq!(ApiError::Unauthorized.to_string(), MSG_UNAUTHORIZED);
        assert_eq!(
            ApiError::server(409, "El email ya existe").to_string(),
            "El email ya existe"
        );
        assert!(ApiError::Network("timeout".into())
            .to_string()
            .contains("timeout"));
    }

    #[test]
    fn only_unauthorized_ends_the_session() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::server(401, "Credenciales inválidas").is_unauthorized());
        assert!(!ApiError::Network("offline".into()).is_unauthorized());
    }
}
