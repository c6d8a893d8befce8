//! 用户相关的模态框：详情、新建、编辑、删除

use backoffice_shared::User;
use backoffice_shared::format::format_long_date;
use backoffice_shared::protocol::{DeleteUserRequest, ListRoles};
use leptos::prelude::*;

use super::form_state::UserForm;
use crate::components::common::SubmitButton;
use crate::components::modal::{ConfirmDelete, Modal};
use crate::query::{use_lazy_query, use_mutator};
use crate::toast::use_toaster;

#[component]
fn DetailRow(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="grid grid-cols-3 gap-2 py-2 border-b border-base-200">
            <span class="text-sm text-base-content/60">{label}</span>
            <span class="col-span-2 text-sm">{children()}</span>
        </div>
    }
}

#[component]
pub fn UserDetailDialog(open: RwSignal<bool>, #[prop(into)] user: Signal<Option<User>>) -> impl IntoView {
    let field = move |f: fn(&User) -> String| move || user.with(|u| u.as_ref().map(f).unwrap_or_default());

    view! {
        <Modal open=open title="Detalles del Usuario" description="Información completa del usuario">
            <div class="py-2">
                <DetailRow label="ID">{field(|u| u.id.to_string())}</DetailRow>
                <DetailRow label="Email">{field(|u| u.email.clone())}</DetailRow>
                <DetailRow label="Nombre">
                    {field(|u| {
                        let name = u.full_name();
                        if name.is_empty() { "-".to_string() } else { name }
                    })}
                </DetailRow>
                <DetailRow label="Rol">{field(|u| u.role_label().to_string())}</DetailRow>
                <DetailRow label="Estado">
                    {move || {
                        let active = user.with(|u| u.as_ref().is_some_and(|u| u.is_active));
                        if active {
                            view! { <span class="badge badge-success">"Activo"</span> }.into_any()
                        } else {
                            view! { <span class="badge badge-ghost">"Inactivo"</span> }.into_any()
                        }
                    }}
                </DetailRow>
                <Show when=move || user.with(|u| u.as_ref().is_some_and(|u| u.created_at.is_some()))>
                    <DetailRow label="Fecha de registro">
                        {field(|u| u.created_at.as_deref().map(format_long_date).unwrap_or_default())}
                    </DetailRow>
                </Show>
            </div>
            <div class="modal-action">
                <button type="button" class="btn" on:click=move |_| open.set(false)>"Cerrar"</button>
            </div>
        </Modal>
    }
}

#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=input_type
                required=required
                class="input input-bordered w-full"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn CreateUserDialog(open: RwSignal<bool>, #[prop(into)] on_saved: Callback<()>) -> impl IntoView {
    let form = UserForm::new();
    let pending = RwSignal::new(false);
    let roles = use_lazy_query(ListRoles);
    let mutator = use_mutator();
    let toaster = use_toaster();

    // 打开时加载角色列表
    Effect::new(move |_| {
        if open.get() {
            roles.revalidate();
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.draft().to_create() {
            Ok(req) => {
                let description = format!("El usuario {} ha sido creado", req.email);
                mutator.run(req, pending, ("Usuario creado".to_string(), description), move || {
                    form.reset();
                    open.set(false);
                    on_saved.run(());
                });
            }
            Err(message) => toaster.error(message),
        }
    };

    view! {
        <Modal open=open title="Nuevo Usuario" description="Completa los datos para crear un nuevo usuario">
            <form on:submit=on_submit class="space-y-2">
                <div class="grid grid-cols-2 gap-4">
                    <TextField id="create_name" label="Nombre" value=form.name required=true />
                    <TextField id="create_last_name" label="Apellido" value=form.last_name />
                </div>
                <TextField id="create_email" label="Email" value=form.email input_type="email" required=true />
                <TextField id="create_password" label="Contraseña" value=form.password input_type="password" required=true />

                <div class="form-control">
                    <label class="label"><span class="label-text">"Rol"</span></label>
                    <select
                        class="select select-bordered w-full"
                        on:change=move |ev| form.role_id.set(event_target_value(&ev).parse::<i64>().ok())
                    >
                        <option value="" disabled selected=move || form.role_id.get().is_none()>
                            {move || if roles.is_loading() { "Cargando roles..." } else { "Selecciona un rol" }}
                        </option>
                        <For
                            each=move || roles.data.get().unwrap_or_default()
                            key=|r| r.clone()
                            children=move |role| {
                                let id = role.id;
                                view! {
                                    <option value=id.to_string() selected=move || form.role_id.get() == Some(id)>
                                        {role.name.clone()}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>

                <div class="form-control">
                    <label class="label cursor-pointer justify-start gap-4">
                        <input
                            type="checkbox"
                            class="toggle toggle-primary"
                            prop:checked=move || form.is_active.get()
                            on:change=move |ev| form.is_active.set(event_target_checked(&ev))
                        />
                        <span class="label-text">"Usuario activo"</span>
                    </label>
                </div>

                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancelar"</button>
                    <SubmitButton
                        pending=pending
                        disabled=Signal::derive(move || form.role_id.get().is_none())
                        label="Crear Usuario"
                        pending_label="Creando..."
                    />
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn EditUserDialog(
    open: RwSignal<bool>,
    #[prop(into)] user: Signal<Option<User>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let form = UserForm::new();
    let pending = RwSignal::new(false);
    let mutator = use_mutator();
    let toaster = use_toaster();

    Effect::new(move |_| {
        if open.get() {
            if let Some(u) = user.get_untracked() {
                form.fill_from(&u);
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = user.with_untracked(|u| u.as_ref().map(|u| u.id)) else {
            return;
        };
        match form.draft().to_update(id) {
            Ok(req) => {
                let description = format!("El usuario {} ha sido actualizado", req.email);
                mutator.run(req, pending, ("Usuario actualizado".to_string(), description), move || {
                    open.set(false);
                    on_saved.run(());
                });
            }
            Err(message) => toaster.error(message),
        }
    };

    view! {
        <Modal open=open title="Editar Usuario" description="Modifica los datos del usuario">
            <form on:submit=on_submit class="space-y-2">
                <div class="grid grid-cols-2 gap-4">
                    <TextField id="edit_name" label="Nombre" value=form.name />
                    <TextField id="edit_last_name" label="Apellido" value=form.last_name />
                </div>
                <TextField id="edit_email" label="Email" value=form.email input_type="email" required=true />
                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancelar"</button>
                    <SubmitButton pending=pending label="Guardar Cambios" pending_label="Guardando..." />
                </div>
            </form>
        </Modal>
    }
}

#[component]
pub fn DeleteUserDialog(
    open: RwSignal<bool>,
    #[prop(into)] user: Signal<Option<User>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let pending = RwSignal::new(false);
    let mutator = use_mutator();
    let subject = Signal::derive(move || {
        user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default())
    });

    let on_confirm = move |_: ()| {
        let Some((id, email)) = user.with_untracked(|u| u.as_ref().map(|u| (u.id, u.email.clone())))
        else {
            return;
        };
        mutator.run(
            DeleteUserRequest { id },
            pending,
            (
                "Usuario eliminado".to_string(),
                format!("El usuario {} ha sido eliminado", email),
            ),
            move || {
                open.set(false);
                on_saved.run(());
            },
        );
    };

    view! {
        <ConfirmDelete
            open=open
            title="Eliminar Usuario"
            subject=subject
            pending=pending
            on_confirm=on_confirm
        />
    }
}
