//! Named signals.
//!
//! Daemons with the [`SignalObserver`](crate::daemon::SignalObserver)
//! capability declare `(signal name, callback)` pairs. The router subscribes
//! each pair with a [`SignalSource`] when the daemon is registered, and
//! unsubscribes them when the router is dropped.
//!
//! [`SignalCenter`] is the in-process source: anything holding it can
//! [`post`](SignalCenter::post) a signal to every subscriber of that name.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A named signal with an optional payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Name subscribers registered for
    pub name: String,

    /// Arbitrary payload
    #[serde(default)]
    pub payload: Option<JsonValue>,
}

impl Signal {
    /// Create a signal without payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Callback invoked for each posted signal.
pub type SignalCallback = Arc<dyn Fn(&Signal) + Send + Sync>;

/// Handle returned by [`SignalSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Subscription interface of an external signal source.
pub trait SignalSource: Send + Sync {
    /// Subscribe `callback` to signals named `name`.
    fn subscribe(&self, name: &str, callback: SignalCallback) -> SubscriptionId;

    /// Remove a subscription. Returns `false` if it was unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

struct Subscriber {
    id: SubscriptionId,
    name: String,
    callback: SignalCallback,
}

/// In-process signal source.
#[derive(Default)]
pub struct SignalCenter {
    next_id: AtomicU64,
    subscribers: RwLock<Vec<Subscriber>>,
}

impl SignalCenter {
    /// Create an empty center
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `signal` to every subscriber of its name, in subscription
    /// order. Returns how many callbacks ran.
    ///
    /// Callbacks run outside the lock and may subscribe or unsubscribe.
    pub fn post(&self, signal: &Signal) -> usize {
        let callbacks: Vec<SignalCallback> = self
            .subscribers
            .read()
            .iter()
            .filter(|s| s.name == signal.name)
            .map(|s| Arc::clone(&s.callback))
            .collect();

        tracing::trace!(signal = %signal.name, subscribers = callbacks.len(), "posting signal");
        for callback in &callbacks {
            callback(signal);
        }
        callbacks.len()
    }

    /// Number of subscribers for a signal name.
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscribers
            .read()
            .iter()
            .filter(|s| s.name == name)
            .count()
    }

    /// Total number of subscriptions.
    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Whether there are no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }
}

impl SignalSource for SignalCenter {
    fn subscribe(&self, name: &str, callback: SignalCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push(Subscriber {
            id,
            name: name.to_string(),
            callback,
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before_len = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() < before_len
    }
}

impl fmt::Debug for SignalCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalCenter")
            .field("subscriber_count", &self.len())
            .finish()
    }
}
