//! 角色管理页
//!
//! 新建与编辑共用同一个对话框，由 `editing` 是否为空区分。

mod form_state;

use backoffice_shared::Role;
use backoffice_shared::format::format_long_date;
use backoffice_shared::protocol::{DeleteRoleRequest, ListRoles};
use backoffice_shared::search::filter;
use leptos::prelude::*;

use crate::components::common::{EmptyRow, PageHeader, RowAction, SearchInput, SkeletonRows, SubmitButton};
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::components::modal::{ConfirmDelete, Modal};
use crate::query::{use_mutator, use_query};
use form_state::RoleDraft;

const COLUMNS: usize = 3;

#[component]
fn RoleDialog(
    open: RwSignal<bool>,
    /// `None` 表示新建
    #[prop(into)] editing: Signal<Option<Role>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let mutator = use_mutator();

    Effect::new(move |_| {
        if open.get() {
            name.set(editing.with_untracked(|r| r.as_ref().map(|r| r.name.clone()).unwrap_or_default()));
        }
    });

    let title = Signal::derive(move || {
        let title = if editing.with(Option::is_some) { "Editar Rol" } else { "Nuevo Rol" };
        title.to_string()
    });
    let blank = Signal::derive(move || !RoleDraft { name: name.get() }.is_submittable());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = RoleDraft { name: name.get_untracked() };
        let done = move || {
            open.set(false);
            on_saved.run(());
        };

        match editing.get_untracked() {
            Some(role) => {
                if let Some(req) = draft.to_update(role.id) {
                    let description = format!("El rol {} ha sido actualizado", req.name);
                    mutator.run(req, pending, ("Rol actualizado".to_string(), description), done);
                }
            }
            None => {
                if let Some(req) = draft.to_create() {
                    let description = format!("El rol {} ha sido creado", req.name);
                    mutator.run(req, pending, ("Rol creado".to_string(), description), done);
                }
            }
        }
    };

    view! {
        <Modal open=open title=title>
            <form on:submit=on_submit class="space-y-2">
                <div class="form-control">
                    <label for="role_name" class="label">
                        <span class="label-text">"Nombre"</span>
                    </label>
                    <input
                        id="role_name"
                        type="text"
                        placeholder="Ej: Administrador"
                        required
                        class="input input-bordered w-full"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </div>
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancelar"</button>
                    <SubmitButton pending=pending disabled=blank label="Guardar" pending_label="Guardando..." />
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn RolesPage() -> impl IntoView {
    let roles = use_query(ListRoles);
    let search = RwSignal::new(String::new());
    let selected = RwSignal::new(Option::<Role>::None);
    let dialog_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let mutator = use_mutator();

    let filtered = move || {
        roles
            .data
            .with(|d| d.as_deref().map(|list| filter(list, &search.get())))
            .unwrap_or_default()
    };
    let refresh = move |_: ()| roles.mutate();

    let on_delete = move |_: ()| {
        let Some(role) = selected.get_untracked() else {
            return;
        };
        mutator.run(
            DeleteRoleRequest { id: role.id },
            deleting,
            (
                "Rol eliminado".to_string(),
                format!("El rol {} ha sido eliminado", role.name),
            ),
            move || {
                delete_open.set(false);
                roles.mutate();
            },
        );
    };

    view! {
        <PageHeader title="Roles" description="Gestiona los roles del sistema">
            <button
                class="btn btn-primary gap-2"
                on:click=move |_| {
                    selected.set(None);
                    dialog_open.set(true);
                }
            >
                <Plus attr:class="h-4 w-4" /> "Nuevo Rol"
            </button>
        </PageHeader>

        <SearchInput value=search placeholder="Buscar roles..." />

        <div class="overflow-x-auto bg-base-100 rounded-box shadow">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Nombre"</th>
                        <th>"Fecha de creación"</th>
                        <th class="text-right">"Acciones"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || roles.is_loading()>
                        <SkeletonRows columns=COLUMNS />
                    </Show>
                    <Show when=move || !roles.is_loading() && filtered().is_empty()>
                        <EmptyRow columns=COLUMNS message="No se encontraron roles" />
                    </Show>
                    <For
                        each=filtered
                        // 整条记录作 key，改名后该行重新渲染
                        key=|r| r.clone()
                        children=move |role| {
                            let (r_edit, r_delete) = (role.clone(), role.clone());
                            view! {
                                <tr>
                                    <td class="font-medium">{role.name.clone()}</td>
                                    <td>{role.created_at.as_deref().map(format_long_date).unwrap_or_else(|| "-".to_string())}</td>
                                    <td>
                                        <div class="flex justify-end gap-1">
                                            <RowAction
                                                title="Editar"
                                                on_click=move |_: ()| {
                                                    selected.set(Some(r_edit.clone()));
                                                    dialog_open.set(true);
                                                }
                                            >
                                                <Pencil attr:class="h-4 w-4" />
                                            </RowAction>
                                            <RowAction
                                                title="Eliminar"
                                                danger=true
                                                on_click=move |_: ()| {
                                                    selected.set(Some(r_delete.clone()));
                                                    delete_open.set(true);
                                                }
                                            >
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

        <RoleDialog open=dialog_open editing=selected on_saved=refresh />
        <ConfirmDelete
            open=delete_open
            title="Eliminar Rol"
            subject=Signal::derive(move || selected.with(|r| r.as_ref().map(|r| r.name.clone()).unwrap_or_default()))
            pending=deleting
            on_confirm=on_delete
        />
    }
}
