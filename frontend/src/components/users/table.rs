use backoffice_shared::User;
use leptos::prelude::*;

use crate::components::common::{EmptyRow, RowAction, SkeletonRows};
use crate::components::icons::{Eye, Pencil, Trash2};

const COLUMNS: usize = 4;

/// 行的 key 取整条记录：编辑后重新获取时，内容变化的行会重新渲染，
/// 行内按钮捕获的也是最新记录。
fn row_key(user: &User) -> User {
    user.clone()
}

/// 用户列表表格
#[component]
pub fn UsersTable(
    #[prop(into)] users: Signal<Vec<User>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] on_view: Callback<User>,
    #[prop(into)] on_edit: Callback<User>,
    #[prop(into)] on_delete: Callback<User>,
) -> impl IntoView {
    view! {
        <div class="overflow-x-auto bg-base-100 rounded-box shadow">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Email"</th>
                        <th>"Nombre"</th>
                        <th>"Rol"</th>
                        <th class="text-right">"Acciones"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || loading.get()>
                        <SkeletonRows columns=COLUMNS />
                    </Show>
                    <Show when=move || !loading.get() && users.with(Vec::is_empty)>
                        <EmptyRow columns=COLUMNS message="No se encontraron usuarios" />
                    </Show>
                    <For
                        each=move || users.get()
                        key=row_key
                        children=move |user| {
                            let (u_view, u_edit, u_delete) = (user.clone(), user.clone(), user.clone());
                            view! {
                                <tr>
                                    <td class="font-medium">{user.email.clone()}</td>
                                    <td>{user.full_name()}</td>
                                    <td>
                                        <span class="badge badge-outline">{user.role_label().to_string()}</span>
                                    </td>
                                    <td>
                                        <div class="flex justify-end gap-1">
                                            <RowAction title="Ver" on_click=move |_: ()| on_view.run(u_view.clone())>
                                                <Eye attr:class="h-4 w-4" />
                                            </RowAction>
                                            <RowAction title="Editar" on_click=move |_: ()| on_edit.run(u_edit.clone())>
                                                <Pencil attr:class="h-4 w-4" />
                                            </RowAction>
                                            <RowAction title="Eliminar" danger=true on_click=move |_: ()| on_delete.run(u_delete.clone())>
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
