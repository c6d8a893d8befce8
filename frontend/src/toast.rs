//! 通知提示
//!
//! 成功或失败的操作结果以 toast 形式显示在右上角，3 秒后自动消失。

use leptos::prelude::*;
use std::time::Duration;

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

impl Toast {
    fn alert_class(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "alert alert-success shadow-lg",
            ToastKind::Error => "alert alert-error shadow-lg",
        }
    }
}

#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) {
        self.push(ToastKind::Success, title.into(), description.into());
    }

    /// 标题为 "Error" 的错误提示
    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, "Error".to_string(), message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, title: String, description: String) {
        let id = self.next_id.with_value(|id| *id);
        self.next_id.set_value(id + 1);

        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                title,
                description,
            })
        });

        let this = *self;
        set_timeout(move || this.dismiss(id), TOAST_LIFETIME);
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

#[component]
pub fn ToastViewport() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toaster.toasts.get()
                key=|t| t.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.alert_class() on:click=move |_| toaster.dismiss(id)>
                            <div>
                                <h3 class="font-bold">{toast.title.clone()}</h3>
                                <div class="text-sm">{toast.description.clone()}</div>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
