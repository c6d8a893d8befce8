//! 服务表单状态
//!
//! 价格以文本输入，提交前解析；留空表示不设置价格。

use backoffice_shared::protocol::{CreateServiceRequest, UpdateServiceRequest};
use backoffice_shared::{EntityId, Service};
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub name: String,
    pub price: String,
    pub active: bool,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            active: true,
        }
    }
}

pub fn parse_price(raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err(format!("Precio inválido: {}", raw)),
    }
}

impl ServiceDraft {
    fn name(&self) -> Result<String, String> {
        let name = self.name.trim();
        if name.is_empty() {
            Err("El nombre es obligatorio".to_string())
        } else {
            Ok(name.to_string())
        }
    }

    pub fn to_create(&self) -> Result<CreateServiceRequest, String> {
        Ok(CreateServiceRequest {
            name: self.name()?,
            price: parse_price(&self.price)?,
            active: self.active,
        })
    }

    pub fn to_update(&self, id: EntityId) -> Result<UpdateServiceRequest, String> {
        Ok(UpdateServiceRequest {
            id,
            name: self.name()?,
            price: parse_price(&self.price)?,
        })
    }
}

#[derive(Clone, Copy)]
pub struct ServiceForm {
    pub name: RwSignal<String>,
    pub price: RwSignal<String>,
    pub active: RwSignal<bool>,
}

impl ServiceForm {
    pub fn new() -> Self {
        let draft = ServiceDraft::default();
        Self {
            name: RwSignal::new(draft.name),
            price: RwSignal::new(draft.price),
            active: RwSignal::new(draft.active),
        }
    }

    fn load(&self, draft: ServiceDraft) {
        self.name.set(draft.name);
        self.price.set(draft.price);
        self.active.set(draft.active);
    }

    pub fn reset(&self) {
        self.load(ServiceDraft::default());
    }

    pub fn fill_from(&self, service: &Service) {
        self.load(ServiceDraft {
            name: service.name.clone(),
            price: service.price.map(|p| p.to_string()).unwrap_or_default(),
            active: service.is_active(),
        });
    }

    pub fn draft(&self) -> ServiceDraft {
        ServiceDraft {
            name: self.name.get_untracked(),
            price: self.price.get_untracked(),
            active: self.active.get_untracked(),
        }
    }
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_price_is_omitted() {
        let draft = ServiceDraft {
            name: "Corte".into(),
            ..Default::default()
        };
        let req = draft.to_create().unwrap();
        assert_eq!(req.price, None);
        assert!(req.active);
    }

    #[test]
    fn decimal_price_is_parsed() {
        assert_eq!(parse_price(" 12500.5 "), Ok(Some(12500.5)));
        assert_eq!(parse_price("0"), Ok(Some(0.0)));
    }

    #[test]
    fn bad_price_is_rejected_before_sending() {
        assert!(parse_price("abc").is_err());
        assert!(parse_price("-5").is_err());

        let draft = ServiceDraft {
            name: "Corte".into(),
            price: "gratis".into(),
            active: true,
        };
        assert!(draft.to_create().is_err());
    }

    #[test]
    fn name_is_required() {
        let draft = ServiceDraft {
            name: "  ".into(),
            price: "100".into(),
            active: false,
        };
        assert_eq!(draft.to_update(EntityId::Int(1)).unwrap_err(), "El nombre es obligatorio");
    }

    #[test]
    fn update_keeps_id_and_price() {
        let draft = ServiceDraft {
            name: "Lavado".into(),
            price: "9990".into(),
            active: true,
        };
        let req = draft.to_update(EntityId::Text("svc-1".into())).unwrap();
        assert_eq!(req.id, EntityId::Text("svc-1".into()));
        assert_eq!(req.price, Some(9990.0));
    }
}
