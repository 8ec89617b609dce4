//! Toast records and the values used to create them.

use std::rc::Weak;
use std::time::Duration;

use serde::Serialize;
use serde_with::{DurationMilliSeconds, serde_as};

use crate::id::ToastId;
use crate::manager::Store;
use crate::types::ToastKind;

/// Everything a caller provides to create a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastInput {
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
    pub duration: Option<Duration>,
}

impl ToastInput {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: None,
            duration: None,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Display-lifetime hint handed to the display layer untouched.
    #[must_use]
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// An active toast as seen by the display layer.
///
/// Records are immutable once committed; the only way to affect the list
/// from a record is its [`Dismiss`] handle.
#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    title: String,
    message: Option<String>,
    #[serde(rename = "duration_ms")]
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    duration: Option<Duration>,
    #[serde(skip)]
    on_dismiss: Dismiss,
}

impl Toast {
    pub(crate) fn new(id: ToastId, input: ToastInput, store: Weak<Store>) -> Self {
        let on_dismiss = Dismiss {
            store,
            id: id.clone(),
        };
        Self {
            id,
            kind: input.kind,
            title: input.title,
            message: input.message,
            duration: input.duration,
            on_dismiss,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ToastId {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Removal capability bound to this toast's id.
    #[must_use]
    pub const fn on_dismiss(&self) -> &Dismiss {
        &self.on_dismiss
    }
}

impl PartialEq for Toast {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.title == other.title
            && self.message == other.message
            && self.duration == other.duration
    }
}

impl Eq for Toast {}

/// Handle that removes one toast from the manager it came from.
///
/// It only holds a weak reference: once the manager is dropped, dismissing
/// does nothing. Calling it more than once is harmless.
#[derive(Debug, Clone)]
pub struct Dismiss {
    store: Weak<Store>,
    id: ToastId,
}

impl Dismiss {
    #[must_use]
    pub const fn id(&self) -> &ToastId {
        &self.id
    }

    /// Returns `true` if this call removed the toast.
    pub fn dismiss(&self) -> bool {
        self.store
            .upgrade()
            .is_some_and(|store| store.remove(self.id.as_str()))
    }
}
