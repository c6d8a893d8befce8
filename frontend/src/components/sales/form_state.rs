use backoffice_shared::protocol::CreateSaleRequest;
use backoffice_shared::{EntityId, PaymentMethod, Service};
use leptos::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleDraft {
    /// 已选服务的原始 id，`None` 表示未选择
    pub service_id: Option<EntityId>,
    pub amount: String,
    pub payment_method: PaymentMethod,
}

impl SaleDraft {
    pub fn to_create(&self) -> Result<CreateSaleRequest, String> {
        let service_id = self
            .service_id
            .clone()
            .ok_or_else(|| "Selecciona un servicio".to_string())?;

        let amount = match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return Err("El monto debe ser mayor a 0".to_string()),
        };

        Ok(CreateSaleRequest {
            service_id,
            amount,
            payment_method: self.payment_method,
        })
    }
}

/// 由下拉框的值找回服务本身的 id
///
/// `<option>` 只能携带字符串，直接解析会把 `"0042"` 变成数字 42，
/// 所以回到已加载的服务列表中查找。
pub fn find_service_id(services: &[Service], value: &str) -> Option<EntityId> {
    services
        .iter()
        .find(|s| s.id.to_string() == value)
        .map(|s| s.id.clone())
}

#[derive(Clone, Copy)]
pub struct SaleForm {
    pub service_id: RwSignal<Option<EntityId>>,
    pub amount: RwSignal<String>,
    pub payment_method: RwSignal<PaymentMethod>,
}

impl SaleForm {
    pub fn new() -> Self {
        Self {
            service_id: RwSignal::new(None),
            amount: RwSignal::new(String::new()),
            payment_method: RwSignal::new(PaymentMethod::default()),
        }
    }

    pub fn reset(&self) {
        let draft = SaleDraft::default();
        self.service_id.set(draft.service_id);
        self.amount.set(draft.amount);
        self.payment_method.set(draft.payment_method);
    }

    pub fn draft(&self) -> SaleDraft {
        SaleDraft {
            service_id: self.service_id.get_untracked(),
            amount: self.amount.get_untracked(),
            payment_method: self.payment_method.get_untracked(),
        }
    }
}

impl Default for SaleForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SaleDraft {
        SaleDraft {
            service_id: Some(EntityId::Int(4)),
            amount: "15000".into(),
            payment_method: PaymentMethod::Tarjeta,
        }
    }

    #[test]
    fn builds_request_with_numeric_service_id() {
        let req = filled().to_create().unwrap();
        assert_eq!(req.service_id, EntityId::Int(4));
        assert_eq!(req.amount, 15000.0);
        assert_eq!(req.payment_method, PaymentMethod::Tarjeta);
    }

    #[test]
    fn service_is_required() {
        let draft = SaleDraft {
            service_id: None,
            ..filled()
        };
        assert_eq!(draft.to_create().unwrap_err(), "Selecciona un servicio");
    }

    fn service(id: EntityId) -> Service {
        Service {
            id,
            name: "Lavado".into(),
            price: Some(5000.0),
            active: Some(true),
        }
    }

    #[test]
    fn selected_service_keeps_its_original_id() {
        let services = vec![
            service(EntityId::Text("0042".into())),
            service(EntityId::Int(42)),
        ];
        assert_eq!(
            find_service_id(&services, "0042"),
            Some(EntityId::Text("0042".into()))
        );
        assert_eq!(find_service_id(&services, "42"), Some(EntityId::Int(42)));
        assert_eq!(find_service_id(&services, ""), None);

        let draft = SaleDraft {
            service_id: find_service_id(&services, "0042"),
            ..filled()
        };
        assert_eq!(
            draft.to_create().unwrap().service_id,
            EntityId::Text("0042".into())
        );
    }

    #[test]
    fn amount_must_be_positive() {
        for amount in ["", "0", "-10", "mucho"] {
            let draft = SaleDraft {
                amount: amount.into(),
                ..filled()
            };
            assert!(draft.to_create().is_err(), "accepted {:?}", amount);
        }
    }

    #[test]
    fn cash_is_the_default_method() {
        assert_eq!(SaleDraft::default().payment_method, PaymentMethod::Efectivo);
    }
}
