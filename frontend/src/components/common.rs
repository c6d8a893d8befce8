//! 列表页共用的小组件

use leptos::prelude::*;

use crate::components::icons::Search;

/// 列表加载时显示的骨架行数
pub const SKELETON_ROWS: usize = 5;

/// 页面标题栏，右侧放操作按钮
#[component]
pub fn PageHeader(
    title: &'static str,
    description: &'static str,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-4 md:flex-row md:items-center md:justify-between">
            <div>
                <h1 class="text-3xl font-bold">{title}</h1>
                <p class="text-base-content/70">{description}</p>
            </div>
            {children.map(|c| c())}
        </div>
    }
}

#[component]
pub fn SearchInput(value: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <label class="input input-bordered flex items-center gap-2 w-full max-w-sm">
            <Search attr:class="h-4 w-4 opacity-50" />
            <input
                type="search"
                class="grow"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn SkeletonRows(columns: usize) -> impl IntoView {
    (0..SKELETON_ROWS)
        .map(|_| {
            view! {
                <tr>
                    {(0..columns)
                        .map(|_| view! { <td><div class="skeleton h-4 w-full"></div></td> })
                        .collect_view()}
                </tr>
            }
        })
        .collect_view()
}

#[component]
pub fn EmptyRow(columns: usize, message: &'static str) -> impl IntoView {
    view! {
        <tr>
            <td colspan=columns.to_string() class="text-center py-8 text-base-content/50">
                {message}
            </td>
        </tr>
    }
}

/// 提交按钮：请求进行中时禁用并显示加载文字
#[component]
pub fn SubmitButton(
    #[prop(into)] pending: Signal<bool>,
    #[prop(into, optional)] disabled: MaybeProp<bool>,
    label: &'static str,
    pending_label: &'static str,
) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary" disabled=move || pending.get() || disabled.get().unwrap_or(false)>
            {move || if pending.get() {
                view! { <span class="loading loading-spinner"></span> {pending_label} }.into_any()
            } else {
                label.into_any()
            }}
        </button>
    }
}

/// 表格行尾的操作按钮
#[component]
pub fn RowAction(
    title: &'static str,
    #[prop(optional)] danger: bool,
    #[prop(into)] on_click: Callback<()>,
    children: Children,
) -> impl IntoView {
    let class = if danger {
        "btn btn-ghost btn-sm btn-square text-error"
    } else {
        "btn btn-ghost btn-sm btn-square"
    };

    view! {
        <button type="button" class=class title=title on:click=move |_| on_click.run(())>
            {children()}
        </button>
    }
}
