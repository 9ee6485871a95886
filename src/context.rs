use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use once_cell::sync::Lazy;

use crate::filter::Filterable;

/// Path this widget writes its current filter text to, for any sibling
/// widget that wants to observe it.
pub const ORDER_FILTER_PATH: &str = "/custom/worklistext/orderFilter";

/// Path the work-list widget publishes its data handle under.
pub const WORK_LIST_PATH: &str = "/workList";

/// Handle published by the work-list widget.
///
/// The handle may or may not support filtering directly; `filterable`
/// resolves that capability once, instead of callers probing ad hoc.
pub trait WorkListHandle: Send + Sync {
    fn filterable(&self) -> Option<Arc<dyn Filterable>>;
}

/// Value stored at a context path.
#[derive(Clone)]
pub enum ContextValue {
    Text(String),
    WorkList(Arc<dyn WorkListHandle>),
}

impl ContextValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContextValue::Text(text) => Some(text),
            ContextValue::WorkList(_) => None,
        }
    }

    pub fn as_work_list(&self) -> Option<&Arc<dyn WorkListHandle>> {
        match self {
            ContextValue::WorkList(handle) => Some(handle),
            ContextValue::Text(_) => None,
        }
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ContextValue::WorkList(_) => f.write_str("WorkList(..)"),
        }
    }
}

/// Callback invoked when a subscribed path is written.
pub type ContextCallback = Box<dyn Fn(&ContextValue) + Send + Sync>;

/// Keyed publish point shared by the widgets of one host view.
///
/// Both paths this crate touches are owned elsewhere: the store must be
/// treated as possibly stale or unpopulated on every read.
pub trait ContextStore: Send + Sync {
    fn get(&self, path: &str) -> Option<ContextValue>;
    fn set(&self, path: &str, value: ContextValue);
    fn subscribe(&self, path: &str, owner: &str, callback: ContextCallback);
    /// Drops every subscription registered under `owner`. Called once at
    /// widget teardown.
    fn unsubscribe_all(&self, owner: &str);
}

struct Subscription {
    owner: String,
    path: String,
    callback: Arc<dyn Fn(&ContextValue) + Send + Sync>,
}

/// In-memory `ContextStore` used by hosts and tests alike.
#[derive(Default)]
pub struct MemoryContextStore {
    values: RwLock<HashMap<String, ContextValue>>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContextStore for MemoryContextStore {
    fn get(&self, path: &str) -> Option<ContextValue> {
        self.values
            .read()
            .ok()
            .and_then(|values| values.get(path).cloned())
    }

    fn set(&self, path: &str, value: ContextValue) {
        if let Ok(mut values) = self.values.write() {
            values.insert(path.to_string(), value.clone());
        }
        // Snapshot the matching callbacks and invoke them with no lock
        // held, so a callback may re-enter the store (read back, write
        // another path, or change subscriptions).
        let callbacks: Vec<Arc<dyn Fn(&ContextValue) + Send + Sync>> =
            match self.subscriptions.lock() {
                Ok(subscriptions) => subscriptions
                    .iter()
                    .filter(|sub| sub.path == path)
                    .map(|sub| Arc::clone(&sub.callback))
                    .collect(),
                Err(_) => Vec::new(),
            };
        for callback in callbacks {
            callback(&value);
        }
    }

    fn subscribe(&self, path: &str, owner: &str, callback: ContextCallback) {
        if let Ok(mut subscriptions) = self.subscriptions.lock() {
            subscriptions.push(Subscription {
                owner: owner.to_string(),
                path: path.to_string(),
                callback: Arc::from(callback),
            });
        }
    }

    fn unsubscribe_all(&self, owner: &str) {
        if let Ok(mut subscriptions) = self.subscriptions.lock() {
            subscriptions.retain(|sub| sub.owner != owner);
        }
    }
}

static SHARED: Lazy<Arc<MemoryContextStore>> = Lazy::new(Arc::default);

/// Process-wide store instance, for hosts that wire every widget to the
/// same ambient context. New code should prefer injecting a store.
pub fn shared() -> Arc<MemoryContextStore> {
    Arc::clone(&SHARED)
}
