mod form_state;
mod table;

use backoffice_shared::Service;
use backoffice_shared::protocol::{DeleteServiceRequest, ListServices};
use backoffice_shared::search::filter;
use leptos::prelude::*;

use crate::components::common::{PageHeader, SearchInput, SubmitButton};
use crate::components::icons::Plus;
use crate::components::modal::{ConfirmDelete, Modal};
use crate::query::{use_mutator, use_query};
use crate::toast::use_toaster;
use form_state::ServiceForm;
use table::ServicesTable;

/// 新建 / 编辑服务
///
/// 编辑时不显示“活跃”开关，更新请求只包含名称与价格。
#[component]
fn ServiceDialog(
    open: RwSignal<bool>,
    #[prop(into)] editing: Signal<Option<Service>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let form = ServiceForm::new();
    let pending = RwSignal::new(false);
    let mutator = use_mutator();
    let toaster = use_toaster();
    let is_edit = move || editing.with(Option::is_some);

    Effect::new(move |_| {
        if open.get() {
            match editing.get_untracked() {
                Some(service) => form.fill_from(&service),
                None => form.reset(),
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form.draft();
        let done = move || {
            open.set(false);
            on_saved.run(());
        };

        let result = match editing.get_untracked() {
            Some(service) => draft.to_update(service.id).map(|req| {
                let description = format!("El servicio {} ha sido actualizado", req.name);
                mutator.run(req, pending, ("Servicio actualizado".to_string(), description), done);
            }),
            None => draft.to_create().map(|req| {
                let description = format!("El servicio {} ha sido creado", req.name);
                mutator.run(req, pending, ("Servicio creado".to_string(), description), done);
            }),
        };
        if let Err(message) = result {
            toaster.error(message);
        }
    };

    let title = Signal::derive(move || {
        let title = if is_edit() { "Editar Servicio" } else { "Nuevo Servicio" };
        title.to_string()
    });

    view! {
        <Modal open=open title=title>
            <form on:submit=on_submit class="space-y-2">
                <div class="form-control">
                    <label for="service_name" class="label">
                        <span class="label-text">"Nombre"</span>
                    </label>
                    <input
                        id="service_name"
                        type="text"
                        required
                        class="input input-bordered w-full"
                        prop:value=move || form.name.get()
                        on:input=move |ev| form.name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-control">
                    <label for="service_price" class="label">
                        <span class="label-text">"Precio"</span>
                    </label>
                    <input
                        id="service_price"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="Opcional"
                        class="input input-bordered w-full"
                        prop:value=move || form.price.get()
                        on:input=move |ev| form.price.set(event_target_value(&ev))
                    />
                </div>
                <Show when=move || !is_edit()>
                    <div class="form-control">
                        <label class="label cursor-pointer justify-start gap-4">
                            <input
                                type="checkbox"
                                class="toggle toggle-primary"
                                prop:checked=move || form.active.get()
                                on:change=move |ev| form.active.set(event_target_checked(&ev))
                            />
                            <span class="label-text">"Servicio activo"</span>
                        </label>
                    </div>
                </Show>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancelar"</button>
                    <SubmitButton pending=pending label="Guardar" pending_label="Guardando..." />
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn ServicesPage() -> impl IntoView {
    let services = use_query(ListServices);
    let search = RwSignal::new(String::new());
    let selected = RwSignal::new(Option::<Service>::None);
    let dialog_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let mutator = use_mutator();

    let filtered = Signal::derive(move || {
        services
            .data
            .with(|d| d.as_deref().map(|list| filter(list, &search.get())))
            .unwrap_or_default()
    });
    let loading = Signal::derive(move || services.is_loading());
    let refresh = move |_: ()| services.mutate();

    let on_delete = move |_: ()| {
        let Some(service) = selected.get_untracked() else {
            return;
        };
        let description = format!("El servicio {} ha sido eliminado", service.name);
        mutator.run(
            DeleteServiceRequest { id: service.id },
            deleting,
            ("Servicio eliminado".to_string(), description),
            move || {
                delete_open.set(false);
                services.mutate();
            },
        );
    };

    view! {
        <PageHeader title="Servicios" description="Gestiona los servicios disponibles">
            <button
                class="btn btn-primary gap-2"
                on:click=move |_| {
                    selected.set(None);
                    dialog_open.set(true);
                }
            >
                <Plus attr:class="h-4 w-4" /> "Nuevo Servicio"
            </button>
        </PageHeader>

        <SearchInput value=search placeholder="Buscar servicios..." />

        <ServicesTable
            services=filtered
            loading=loading
            on_edit=move |service: Service| {
                selected.set(Some(service));
                dialog_open.set(true);
            }
            on_delete=move |service: Service| {
                selected.set(Some(service));
                delete_open.set(true);
            }
        />

        <ServiceDialog open=dialog_open editing=selected on_saved=refresh />
        <ConfirmDelete
            open=delete_open
            title="Eliminar Servicio"
            subject=Signal::derive(move || selected.with(|s| s.as_ref().map(|s| s.name.clone()).unwrap_or_default()))
            pending=deleting
            on_confirm=on_delete
        />
    }
}
