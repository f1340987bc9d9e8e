#![allow(non_snake_case)]

use dioxus::prelude::*;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub kind: ToastKind,
    pub message: String,
    /// What the notification is about, e.g. a bot id.
    pub scope: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: usize,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: String, scope: String) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message,
            scope,
        });
        id
    }

    pub fn dismiss(&mut self, id: usize) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Context handle for showing notifications from anywhere below the provider.
#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    queue: Signal<ToastQueue>,
}

impl Toaster {
    pub fn success(&mut self, message: impl Into<String>, scope: impl Into<String>) {
        self.push(ToastKind::Success, message.into(), scope.into());
    }

    pub fn error(&mut self, message: impl Into<String>, scope: impl Into<String>) {
        self.push(ToastKind::Error, message.into(), scope.into());
    }

    pub fn dismiss(&mut self, id: usize) {
        self.queue.write().dismiss(id);
    }

    fn push(&mut self, kind: ToastKind, message: String, scope: String) {
        info!("toast {:?} [{}]: {}", kind, scope, message);
        self.queue.write().push(kind, message, scope);
    }
}

pub fn use_toaster_provider() -> Toaster {
    let queue = use_signal(ToastQueue::default);
    use_context_provider(|| Toaster { queue })
}

/// Shows a success toast when a toaster is in context, otherwise only logs.
pub fn notify_success(toaster: Option<Toaster>, message: &str, scope: &str) {
    match toaster {
        Some(mut toaster) => toaster.success(message, scope),
        None => info!("[{}] {}", scope, message),
    }
}

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "toast toast-success bg-green-600 text-white rounded-md shadow px-4 py-2 flex items-center",
        ToastKind::Error => "toast toast-error bg-red-600 text-white rounded-md shadow px-4 py-2 flex items-center",
    }
}

#[component]
pub fn ToastContainer() -> Element {
    let Some(mut toaster) = try_use_context::<Toaster>() else {
        return rsx! {};
    };

    let toasts = toaster.queue.read().toasts().to_vec();

    rsx! {
        div {
            class: "fixed top-4 right-4 z-50 flex flex-col space-y-2",
            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: toast_class(toast.kind),
                    span {
                        class: "flex-grow",
                        "{toast.message}"
                    }
                    span {
                        class: "ml-2 text-xs opacity-75",
                        "{toast.scope}"
                    }
                    button {
                        class: "ml-3 text-white opacity-75 hover:opacity-100",
                        onclick: move |_| toaster.dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
