mod dialogs;
mod form_state;
mod table;

use backoffice_shared::User;
use backoffice_shared::protocol::ListUsers;
use backoffice_shared::search::filter;
use leptos::prelude::*;

use crate::components::common::{PageHeader, SearchInput};
use crate::components::icons::Plus;
use crate::query::use_query;
use dialogs::{CreateUserDialog, DeleteUserDialog, EditUserDialog, UserDetailDialog};
use table::UsersTable;

#[component]
pub fn UsersPage() -> impl IntoView {
    let users = use_query(ListUsers);
    let search = RwSignal::new(String::new());
    let selected = RwSignal::new(Option::<User>::None);

    let detail_open = RwSignal::new(false);
    let create_open = RwSignal::new(false);
    let edit_open = RwSignal::new(false);
    let delete_open = RwSignal::new(false);

    let filtered = Signal::derive(move || {
        users
            .data
            .with(|d| d.as_deref().map(|list| filter(list, &search.get())))
            .unwrap_or_default()
    });
    let loading = Signal::derive(move || users.is_loading());

    let open_with = move |dialog: RwSignal<bool>| {
        move |user: User| {
            selected.set(Some(user));
            dialog.set(true);
        }
    };
    let refresh = move |_: ()| users.mutate();

    view! {
        <PageHeader title="Usuarios" description="Gestiona los usuarios del sistema">
            <button class="btn btn-primary gap-2" on:click=move |_| create_open.set(true)>
                <Plus attr:class="h-4 w-4" /> "Nuevo Usuario"
            </button>
        </PageHeader>

        <SearchInput value=search placeholder="Buscar por email o nombre..." />

        <UsersTable
            users=filtered
            loading=loading
            on_view=open_with(detail_open)
            on_edit=open_with(edit_open)
            on_delete=open_with(delete_open)
        />

        <UserDetailDialog open=detail_open user=selected />
        <CreateUserDialog open=create_open on_saved=refresh />
        <EditUserDialog open=edit_open user=selected on_saved=refresh />
        <DeleteUserDialog open=delete_open user=selected on_saved=refresh />
    }
}
