//! 表单状态管理模块
//!
//! `UserForm` 把零散的 signal 整合在一起，负责数据的持有与重置；
//! 校验与请求转换放在纯数据的 `UserDraft` 上，便于单元测试。

use backoffice_shared::User;
use backoffice_shared::protocol::{CreateUserRequest, UpdateUserRequest};
use leptos::prelude::*;

/// 表单的一次快照
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role_id: Option<i64>,
    pub is_active: bool,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            role_id: None,
            is_active: true,
        }
    }
}

fn required(value: &str, message: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(message.to_string())
    } else {
        Ok(value.to_string())
    }
}

impl UserDraft {
    pub fn to_create(&self) -> Result<CreateUserRequest, String> {
        let name = required(&self.name, "El nombre es obligatorio")?;
        let email = required(&self.email, "El email es obligatorio")?;
        if self.password.is_empty() {
            return Err("La contraseña es obligatoria".to_string());
        }
        let role_id = self.role_id.ok_or_else(|| "Selecciona un rol".to_string())?;

        Ok(CreateUserRequest {
            name,
            last_name: self.last_name.trim().to_string(),
            email,
            password: self.password.clone(),
            role_id,
            is_active: self.is_active,
        })
    }

    /// 编辑只提交姓名与邮箱；空的姓氏不发送
    pub fn to_update(&self, id: i64) -> Result<UpdateUserRequest, String> {
        let email = required(&self.email, "El email es obligatorio")?;
        let last_name = self.last_name.trim();

        Ok(UpdateUserRequest {
            id,
            name: self.name.trim().to_string(),
            last_name: (!last_name.is_empty()).then(|| last_name.to_string()),
            email,
        })
    }
}

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct UserForm {
    pub name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub role_id: RwSignal<Option<i64>>,
    pub is_active: RwSignal<bool>,
}

impl UserForm {
    pub fn new() -> Self {
        let draft = UserDraft::default();
        Self {
            name: RwSignal::new(draft.name),
            last_name: RwSignal::new(draft.last_name),
            email: RwSignal::new(draft.email),
            password: RwSignal::new(draft.password),
            role_id: RwSignal::new(draft.role_id),
            is_active: RwSignal::new(draft.is_active),
        }
    }

    fn load(&self, draft: UserDraft) {
        self.name.set(draft.name);
        self.last_name.set(draft.last_name);
        self.email.set(draft.email);
        self.password.set(draft.password);
        self.role_id.set(draft.role_id);
        self.is_active.set(draft.is_active);
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.load(UserDraft::default());
    }

    /// 用已有用户预填编辑表单
    pub fn fill_from(&self, user: &User) {
        self.load(UserDraft {
            name: user.name.clone(),
            last_name: user.last_name.clone().unwrap_or_default(),
            email: user.email.clone(),
            password: String::new(),
            role_id: user.role_id,
            is_active: user.is_active,
        });
    }

    pub fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            role_id: self.role_id.get_untracked(),
            is_active: self.is_active.get_untracked(),
        }
    }
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UserDraft {
        UserDraft {
            name: " Ana ".into(),
            last_name: "Pérez".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
            role_id: Some(2),
            is_active: true,
        }
    }

    #[test]
    fn create_trims_and_keeps_role() {
        let req = filled().to_create().unwrap();
        assert_eq!(req.name, "Ana");
        assert_eq!(req.role_id, 2);
        assert!(req.is_active);
    }

    #[test]
    fn create_requires_a_role() {
        let draft = UserDraft {
            role_id: None,
            ..filled()
        };
        assert_eq!(draft.to_create().unwrap_err(), "Selecciona un rol");
    }

    #[test]
    fn create_requires_name_email_and_password() {
        assert!(UserDraft { name: "  ".into(), ..filled() }.to_create().is_err());
        assert!(UserDraft { email: String::new(), ..filled() }.to_create().is_err());
        assert!(UserDraft { password: String::new(), ..filled() }.to_create().is_err());
    }

    #[test]
    fn update_omits_blank_last_name() {
        let draft = UserDraft {
            last_name: " ".into(),
            ..filled()
        };
        let req = draft.to_update(7).unwrap();
        assert_eq!(req.id, 7);
        assert_eq!(req.last_name, None);
        assert_eq!(req.email, "ana@example.com");
    }

    #[test]
    fn new_users_default_to_active() {
        assert!(UserDraft::default().is_active);
    }
}
