use backoffice_shared::{EntityId, Service};
use backoffice_shared::format::format_price;
use leptos::prelude::*;

use crate::components::common::{EmptyRow, RowAction, SkeletonRows};
use crate::components::icons::{Pencil, Trash2};

const COLUMNS: usize = 4;

/// 行的 key 覆盖所有显示字段，编辑后内容变化的行会重新渲染
type RowKey = (EntityId, String, Option<u64>, Option<bool>);

fn row_key(service: &Service) -> RowKey {
    (
        service.id.clone(),
        service.name.clone(),
        service.price.map(f64::to_bits),
        service.active,
    )
}

#[component]
pub fn ServicesTable(
    #[prop(into)] services: Signal<Vec<Service>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_edit: Callback<Service>,
    #[prop(into)] on_delete: Callback<Service>,
) -> impl IntoView {
    view! {
        <div class="overflow-x-auto bg-base-100 rounded-box shadow">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Nombre"</th>
                        <th>"Precio"</th>
                        <th>"Estado"</th>
                        <th class="text-right">"Acciones"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || loading.get()>
                        <SkeletonRows columns=COLUMNS />
                    </Show>
                    <Show when=move || !loading.get() && services.with(Vec::is_empty)>
                        <EmptyRow columns=COLUMNS message="No se encontraron servicios" />
                    </Show>
                    <For
                        each=move || services.get()
                        key=row_key
                        children=move |service| {
                            let (s_edit, s_delete) = (service.clone(), service.clone());
                            let status = if service.is_active() {
                                view! { <span class="badge badge-success">"Activo"</span> }.into_any()
                            } else {
                                view! { <span class="badge badge-ghost">"Inactivo"</span> }.into_any()
                            };
                            view! {
                                <tr>
                                    <td class="font-medium">{service.name.clone()}</td>
                                    <td>{format_price(service.price)}</td>
                                    <td>{status}</td>
                                    <td>
                                        <div class="flex justify-end gap-1">
                                            <RowAction title="Editar" on_click=move |_: ()| on_edit.run(s_edit.clone())>
                                                <Pencil attr:class="h-4 w-4" />
                                            </RowAction>
                                            <RowAction title="Eliminar" danger=true on_click=move |_: ()| on_delete.run(s_delete.clone())>
                                                <Trash2 attr:class="h-4 w-4" />
                                            </RowAction>
                                        </div>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lavado(price: f64) -> Service {
        Service {
            id: EntityId::Int(3),
            name: "Lavado".into(),
            price: Some(price),
            active: Some(true),
        }
    }

    #[test]
    fn price_change_gets_a_new_row() {
        assert_ne!(row_key(&lavado(5000.0)), row_key(&lavado(6500.0)));
        assert_eq!(row_key(&lavado(5000.0)), row_key(&lavado(5000.0)));

        let renamed = Service {
            name: "Lavado Premium".into(),
            ..lavado(5000.0)
        };
        assert_ne!(row_key(&renamed), row_key(&lavado(5000.0)));
    }
}
