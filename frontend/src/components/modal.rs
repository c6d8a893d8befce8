use leptos::prelude::*;

/// 原生 `<dialog>` 模态框，由 `open` 信号控制显示
///
/// 按 Esc 或点击背景关闭时同步回写 `open`。
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into, optional)] description: Option<Signal<String>>,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{move || title.get()}</h3>
                {description.map(|d| view! {
                    <p class="pt-1 pb-4 text-sm text-base-content/70">{move || d.get()}</p>
                })}
                {children()}
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

/// 删除确认框
#[component]
pub fn ConfirmDelete(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    /// 显示在说明中的记录名
    #[prop(into)] subject: Signal<String>,
    pending: RwSignal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let description = Signal::derive(move || {
        format!(
            "¿Estás seguro de eliminar {}? Esta acción no se puede deshacer.",
            subject.get()
        )
    });

    view! {
        <Modal open=open title=title description=description>
            <div class="modal-action">
                <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                    "Cancelar"
                </button>
                <button
                    type="button"
                    class="btn btn-error"
                    disabled=move || pending.get()
                    on:click=move |_| on_confirm.run(())
                >
                    {move || if pending.get() {
                        view! { <span class="loading loading-spinner"></span> "Eliminando..." }.into_any()
                    } else {
                        "Eliminar".into_any()
                    }}
                </button>
            </div>
        </Modal>
    }
}
