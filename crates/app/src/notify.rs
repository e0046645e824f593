//! Transient toast notifications.

use std::time::Duration;

use leptos::{RwSignal, SignalUpdate, create_rw_signal, set_timeout};

const DISMISS_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Signal-backed toast queue. `Copy` so closures can capture it freely.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: create_rw_signal(Vec::new()),
            next_id: create_rw_signal(0),
        }
    }

    pub fn items(&self) -> RwSignal<Vec<Toast>> {
        self.items
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut id = 0;
        self.next_id.update(|next| {
            id = *next;
            *next += 1;
        });
        self.items.update(|items| items.push(Toast { id, kind, message }));

        let items = self.items;
        set_timeout(
            move || items.update(|list| list.retain(|t| t.id != id)),
            DISMISS_AFTER,
        );
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}
