//! The toast state container.
//!
//! A [`ToastManager`] owns an ordered list of active toasts. Every change
//! commits a fresh immutable snapshot built from the latest committed one, then
//! notifies subscribers with it. Snapshots handed out earlier never change.
//!
//! The manager is single-threaded (`Rc`-based) and meant to live in the UI
//! context that owns it. Cloning it yields another handle to the same list;
//! [`ToastManager::new`] always starts an independent one.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::{Config, DurationDefaults, IdScheme};
use crate::id::{IdGenerator, SequentialIds, ToastId, UuidIds};
use crate::toast::{Toast, ToastInput};
use crate::types::ToastKind;

/// Fresh draws attempted before falling back to suffixing a colliding id.
const MAX_ID_DRAWS: usize = 8;

type Observer = Rc<dyn Fn(&[Toast])>;

pub(crate) struct Store {
    toasts: RefCell<Rc<[Toast]>>,
    ids: RefCell<Box<dyn IdGenerator>>,
    durations: DurationDefaults,
    observers: RefCell<Vec<(u64, Observer)>>,
    next_observer: Cell<u64>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
}

impl Store {
    fn snapshot(&self) -> Rc<[Toast]> {
        Rc::clone(&self.toasts.borrow())
    }

    fn commit(&self, next: Vec<Toast>) {
        *self.toasts.borrow_mut() = Rc::from(next);
        self.notify();
    }

    fn contains(&self, id: &str) -> bool {
        self.toasts.borrow().iter().any(|toast| toast.id() == id)
    }

    fn fresh_id(&self) -> ToastId {
        let mut candidate = self.ids.borrow_mut().next_id();
        for _ in 1..MAX_ID_DRAWS {
            if !self.contains(candidate.as_str()) {
                return candidate;
            }
            candidate = self.ids.borrow_mut().next_id();
        }
        if !self.contains(candidate.as_str()) {
            return candidate;
        }

        warn!(id = %candidate, "id generator keeps colliding, suffixing");
        let mut suffix = 1_u64;
        loop {
            let suffixed = ToastId::from(format!("{candidate}~{suffix}"));
            if !self.contains(suffixed.as_str()) {
                return suffixed;
            }
            suffix += 1;
        }
    }

    pub(crate) fn remove(&self, id: &str) -> bool {
        let current = self.snapshot();
        if !current.iter().any(|toast| toast.id() == id) {
            debug!(id, "remove ignored, no such toast");
            return false;
        }
        let next: Vec<Toast> = current
            .iter()
            .filter(|toast| toast.id() != id)
            .cloned()
            .collect();
        debug!(id, active = next.len(), "toast removed");
        self.commit(next);
        true
    }

    fn clear(&self) -> usize {
        let removed = self.toasts.borrow().len();
        if removed > 0 {
            self.commit(Vec::new());
        }
        debug!(removed, "toasts cleared");
        removed
    }

    /// Runs observers until no commit happens during a round, so every
    /// observer ends up seeing the latest snapshot.
    fn notify(&self) {
        if self.notifying.replace(true) {
            self.dirty.set(true);
            return;
        }
        let _reset = NotifyGuard(&self.notifying);
        loop {
            self.dirty.set(false);
            let snapshot = self.snapshot();
            let observers: Vec<Observer> = self
                .observers
                .borrow()
                .iter()
                .map(|(_, observer)| Rc::clone(observer))
                .collect();
            trace!(observers = observers.len(), active = snapshot.len(), "notifying");
            for observer in observers {
                observer(&snapshot);
            }
            if !self.dirty.get() {
                break;
            }
        }
    }
}

struct NotifyGuard<'a>(&'a Cell<bool>);

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Ordered list of active toasts plus the operations that change it.
#[derive(Clone)]
pub struct ToastManager {
    store: Rc<Store>,
}

impl ToastManager {
    /// Creates an empty manager with random UUID ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Box::new(UuidIds), DurationDefaults::default())
    }

    /// Creates an empty manager drawing ids from `ids`.
    #[must_use]
    pub fn with_ids(ids: impl IdGenerator + 'static) -> Self {
        Self::with_parts(Box::new(ids), DurationDefaults::default())
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let ids: Box<dyn IdGenerator> = match &config.ids {
            IdScheme::Uuid => Box::new(UuidIds),
            IdScheme::Sequential { prefix } => Box::new(SequentialIds::new(prefix.clone())),
        };
        Self::with_parts(ids, config.durations)
    }

    fn with_parts(ids: Box<dyn IdGenerator>, durations: DurationDefaults) -> Self {
        Self {
            store: Rc::new(Store {
                toasts: RefCell::new(Rc::from(Vec::new())),
                ids: RefCell::new(ids),
                durations,
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
                notifying: Cell::new(false),
                dirty: Cell::new(false),
            }),
        }
    }

    /// Appends a toast and returns its id.
    ///
    /// The title is not validated; an empty one is accepted as is. When no
    /// duration is given, the configured default for the kind (if any) is
    /// used.
    pub fn add(&self, mut input: ToastInput) -> ToastId {
        let store = &self.store;
        let id = store.fresh_id();
        if input.duration.is_none() {
            input.duration = store.durations.get(input.kind);
        }
        let kind = input.kind;
        let toast = Toast::new(id.clone(), input, Rc::downgrade(store));

        let mut next = store.snapshot().to_vec();
        next.push(toast);
        debug!(%id, %kind, active = next.len(), "toast added");
        store.commit(next);
        id
    }

    pub fn success(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.add_kind(ToastKind::Success, title, message, duration)
    }

    pub fn error(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.add_kind(ToastKind::Error, title, message, duration)
    }

    pub fn warning(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.add_kind(ToastKind::Warning, title, message, duration)
    }

    pub fn info(
        &self,
        title: impl Into<String>,
        message: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.add_kind(ToastKind::Info, title, message, duration)
    }

    fn add_kind(
        &self,
        kind: ToastKind,
        title: impl Into<String>,
        message: Option<&str>,
        duration: Option<Duration>,
    ) -> ToastId {
        self.add(ToastInput {
            kind,
            title: title.into(),
            message: message.map(str::to_string),
            duration,
        })
    }

    /// Removes the toast with `id`. Unknown ids are ignored.
    ///
    /// Returns `true` if a toast was removed.
    pub fn remove(&self, id: impl AsRef<str>) -> bool {
        self.store.remove(id.as_ref())
    }

    /// Removes every toast, returning how many were active.
    pub fn clear_all(&self) -> usize {
        self.store.clear()
    }

    /// Current list, oldest first.
    #[must_use]
    pub fn toasts(&self) -> Rc<[Toast]> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn get(&self, id: impl AsRef<str>) -> Option<Toast> {
        let id = id.as_ref();
        self.store
            .toasts
            .borrow()
            .iter()
            .find(|toast| toast.id() == id)
            .cloned()
    }

    #[must_use]
    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        self.store.contains(id.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.toasts.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers `observer`, called with the new list after every change.
    ///
    /// It is not called for the current state. The observer stays registered
    /// until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unregisters the observer"]
    pub fn subscribe(&self, observer: impl Fn(&[Toast]) + 'static) -> Subscription {
        let key = self.store.next_observer.get();
        self.store.next_observer.set(key + 1);
        let observer: Observer = Rc::new(observer);
        self.store.observers.borrow_mut().push((key, observer));
        Subscription {
            store: Rc::downgrade(&self.store),
            key,
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToastManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastManager")
            .field("toasts", &self.store.toasts.borrow())
            .field("observers", &self.store.observers.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Keeps an observer registered; dropping it unregisters the observer.
#[derive(Debug)]
pub struct Subscription {
    store: Weak<Store>,
    key: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store
                .observers
                .borrow_mut()
                .retain(|(key, _)| *key != self.key);
        }
    }
}
