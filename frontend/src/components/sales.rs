//! 销售记录页
//!
//! 列表来自 `{ data: [...] }` 信封；“Registrar Venta” 对话框用于登记新销售。

mod form_state;

use backoffice_shared::PaymentMethod;
use backoffice_shared::format::{capitalize, format_clp, format_date_time};
use backoffice_shared::protocol::{ListSales, ListServices};
use backoffice_shared::search::filter;
use leptos::prelude::*;

use crate::components::common::{EmptyRow, PageHeader, SearchInput, SkeletonRows, SubmitButton};
use crate::components::icons::Plus;
use crate::components::modal::Modal;
use crate::query::{use_lazy_query, use_mutator, use_query};
use crate::toast::use_toaster;
use form_state::{SaleForm, find_service_id};

const COLUMNS: usize = 5;

#[component]
fn RegisterSaleDialog(open: RwSignal<bool>, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let form = SaleForm::new();
    let pending = RwSignal::new(false);
    let services = use_lazy_query(ListServices);
    let mutator = use_mutator();
    let toaster = use_toaster();

    Effect::new(move |_| {
        if open.get() {
            services.revalidate();
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.draft().to_create() {
            Ok(req) => {
                let description = format!("Venta por {} registrada", format_clp(req.amount));
                mutator.run(req, pending, ("Venta registrada".to_string(), description), move || {
                    form.reset();
                    open.set(false);
                    on_saved.run(());
                });
            }
            Err(message) => toaster.error(message),
        }
    };

    view! {
        <Modal open=open title="Registrar Venta" description="Registra una nueva venta de servicio">
            <form on:submit=on_submit class="space-y-2">
                <div class="form-control">
                    <label class="label"><span class="label-text">"Servicio"</span></label>
                    <select
                        class="select select-bordered w-full"
                        required
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            let id = services
                                .data
                                .with_untracked(|d| d.as_deref().and_then(|list| find_service_id(list, &value)));
                            form.service_id.set(id);
                        }
                    >
                        <option value="" disabled selected=move || form.service_id.with(Option::is_none)>
                            "Selecciona un servicio"
                        </option>
                        <For
                            each=move || {
                                services
                                    .data
                                    .get()
                                    .unwrap_or_default()
                                    .into_iter()
                                    .filter(|s| s.is_active())
                                    .collect::<Vec<_>>()
                            }
                            key=|s| (s.id.clone(), s.name.clone())
                            children=move |service| {
                                let current = service.id.clone();
                                view! {
                                    <option
                                        value=service.id.to_string()
                                        selected=move || form.service_id.with(|id| id.as_ref() == Some(&current))
                                    >
                                        {service.name.clone()}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>

                <div class="form-control">
                    <label for="sale_amount" class="label"><span class="label-text">"Monto"</span></label>
                    <input
                        id="sale_amount"
                        type="number"
                        min="1"
                        required
                        class="input input-bordered w-full"
                        prop:value=move || form.amount.get()
                        on:input=move |ev| form.amount.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-control">
                    <label class="label"><span class="label-text">"Método de pago"</span></label>
                    <select
                        class="select select-bordered w-full"
                        on:change=move |ev| {
                            if let Some(method) = PaymentMethod::parse(&event_target_value(&ev)) {
                                form.payment_method.set(method);
                            }
                        }
                    >
                        {PaymentMethod::ALL
                            .into_iter()
                            .map(|method| view! {
                                <option
                                    value=method.as_str()
                                    selected=move || form.payment_method.get() == method
                                >
                                    {method.label()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancelar"</button>
                    <SubmitButton pending=pending label="Registrar" pending_label="Registrando..." />
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn SalesPage() -> impl IntoView {
    let sales = use_query(ListSales);
    let search = RwSignal::new(String::new());
    let register_open = RwSignal::new(false);

    let filtered = move || {
        sales
            .data
            .with(|d| d.as_ref().map(|page| filter(&page.data, &search.get())))
            .unwrap_or_default()
    };

    view! {
        <PageHeader title="Ventas" description="Historial de ventas registradas">
            <button class="btn btn-primary gap-2" on:click=move |_| register_open.set(true)>
                <Plus attr:class="h-4 w-4" /> "Registrar Venta"
            </button>
        </PageHeader>

        <SearchInput value=search placeholder="Buscar por servicio, método o usuario..." />

        <div class="overflow-x-auto bg-base-100 rounded-box shadow">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Servicio"</th>
                        <th>"Monto"</th>
                        <th>"Método"</th>
                        <th>"Usuario"</th>
                        <th>"Fecha"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || sales.is_loading()>
                        <SkeletonRows columns=COLUMNS />
                    </Show>
                    <Show when=move || !sales.is_loading() && filtered().is_empty()>
                        <EmptyRow columns=COLUMNS message="No se encontraron ventas" />
                    </Show>
                    <For
                        each=filtered
                        key=|s| s.id.clone()
                        children=|sale| {
                            view! {
                                <tr>
                                    <td class="font-medium">{sale.service_name().unwrap_or("-").to_string()}</td>
                                    <td>{format_clp(sale.amount)}</td>
                                    <td>{capitalize(&sale.payment_method)}</td>
                                    <td>{sale.customer_label().to_string()}</td>
                                    <td class="text-sm text-base-content/70">{format_date_time(&sale.created_at)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>

        <RegisterSaleDialog open=register_open on_saved=move |_: ()| sales.mutate() />
    }
}
