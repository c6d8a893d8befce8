use backoffice_shared::protocol::{CreateRoleRequest, UpdateRoleRequest};

/// 角色表单：新建与编辑共用一个名称字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleDraft {
    pub name: String,
}

impl RoleDraft {
    /// 去除首尾空白后的名称，为空时返回 `None`
    pub fn trimmed_name(&self) -> Option<String> {
        let name = self.name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    pub fn is_submittable(&self) -> bool {
        self.trimmed_name().is_some()
    }

    pub fn to_create(&self) -> Option<CreateRoleRequest> {
        self.trimmed_name().map(|name| CreateRoleRequest { name })
    }

    pub fn to_update(&self, id: i64) -> Option<UpdateRoleRequest> {
        self.trimmed_name().map(|name| UpdateRoleRequest { id, name })
    }
}
