//! Event routing.
//!
//! The router owns the [`CapabilityRegistry`] and turns each host event into
//! calls on the daemons that declared the matching capability.
//!
//! ## Selection rules
//!
//! - **First match**: URL opens and local/remote notifications go to at most
//!   one daemon, the earliest registered whose pattern or category matches.
//!   Later candidates are never invoked.
//! - **Broadcast**: token registration, token invalidation and lifecycle
//!   phases go to every daemon with the capability, in registration order.
//!
//! A missing handler is an expected outcome. It is reported through the
//! return value or the completion callback and logged at debug level only.
//!
//! ## Completions
//!
//! Completion callbacks are handed to the selected daemon, which must call
//! them. The router calls them itself only when no daemon was selected.

use herald_config::DispatchConfig;
use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

use crate::capability::Capability;
use crate::daemon::Daemon;
use crate::lifecycle::LifecyclePhase;
use crate::link::{decoded_path, parse_query, QueryParams};
use crate::notification::{FetchResult, LocalNotification};
use crate::registry::{CapabilityRegistry, DaemonId};
use crate::signal::{SignalCenter, SignalSource, SubscriptionId};
use crate::token::Token;

/// A router shared across threads.
///
/// `register` needs the write lock and dispatch the read lock, so the two are
/// never interleaved.
///
/// Handlers and completions run while the dispatching thread holds the read
/// guard. They must not lock the router again: a nested `write()` deadlocks
/// at once, and a nested `read()` deadlocks as soon as another thread is
/// waiting for `write()`. Defer such work until the dispatch returns.
pub type SharedRouter = Arc<RwLock<EventRouter>>;

/// Routes host events to registered daemons.
pub struct EventRouter {
    registry: CapabilityRegistry,
    signals: Arc<dyn SignalSource>,
    subscriptions: Vec<SubscriptionId>,
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    /// Router with default settings and its own [`SignalCenter`].
    pub fn new() -> Self {
        Self::with_signal_source(Arc::new(SignalCenter::new()))
    }

    /// Router that subscribes signal observers with `signals`.
    pub fn with_signal_source(signals: Arc<dyn SignalSource>) -> Self {
        Self::with_config(DispatchConfig::default(), signals)
    }

    /// Router with explicit settings.
    ///
    /// `config` is validated; an invalid one is logged and replaced by the
    /// defaults (see [`CapabilityRegistry::with_config`]).
    pub fn with_config(config: DispatchConfig, signals: Arc<dyn SignalSource>) -> Self {
        Self {
            registry: CapabilityRegistry::with_config(config),
            signals,
            subscriptions: Vec::new(),
        }
    }

    /// Wrap in a lock for use from several threads.
    pub fn into_shared(self) -> SharedRouter {
        Arc::new(RwLock::new(self))
    }

    /// The underlying registry.
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Source that signal observers are subscribed with.
    pub fn signal_source(&self) -> &Arc<dyn SignalSource> {
        &self.signals
    }

    /// Subscriptions created for signal observers so far.
    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }

    /// Every daemon implementing `capability`, in registration order.
    pub fn query(&self, capability: Capability) -> Vec<Arc<dyn Daemon>> {
        self.registry.query(capability)
    }

    /// Register a daemon.
    ///
    /// Signal observers also get each declared `(name, callback)` pair
    /// subscribed with the signal source.
    pub fn register(&mut self, daemon: Arc<dyn Daemon>) -> DaemonId {
        if let Some(observer) = daemon.as_signal_observer() {
            for (name, callback) in observer.signal_handlers() {
                let id = self.signals.subscribe(&name, callback);
                debug!(daemon = daemon.name(), signal = %name, subscription = %id, "subscribed signal");
                self.subscriptions.push(id);
            }
        }
        self.registry.register(daemon)
    }

    // ------------------------------------------------------------------
    // URL
    // ------------------------------------------------------------------

    /// Route an opened URL to the first daemon whose pattern matches.
    ///
    /// Returns the handler's result, or `false` when no pattern matched.
    pub fn dispatch_url_open(&self, url: &Url, source_application: Option<&str>) -> bool {
        debug!(
            scheme = url.scheme(),
            host = ?url.host_str(),
            path = url.path(),
            query = ?url.query(),
            source_application = ?source_application,
            "application open url"
        );

        let Some(host) = url.host_str() else {
            debug!(url = %url, "url has no host, nothing to match");
            return false;
        };
        let path = decoded_path(url);

        for entry in self.registry.entries_with(Capability::UrlHandler) {
            let (Some(handler), Some(pattern)) = (entry.daemon().as_url_handler(), entry.url_pattern())
            else {
                continue;
            };

            if let Some(fragments) = pattern.matches(host, &path) {
                let query: QueryParams = url.query().map(parse_query).unwrap_or_default();
                debug!(
                    daemon = entry.daemon().name(),
                    fragments = ?fragments,
                    "url matched"
                );
                return handler.handle_url(url, &fragments, &query);
            }
        }

        debug!(host, path = %path, "no url handler matched");
        false
    }

    // ------------------------------------------------------------------
    // Local notifications
    // ------------------------------------------------------------------

    /// Route a local notification to the first daemon owning its category.
    pub fn dispatch_local_notification(&self, notification: &LocalNotification) {
        let Some(category) = notification.category.as_deref() else {
            debug!("local notification without category");
            return;
        };
        debug!(category, user_info = ?notification.user_info, "local notification received");

        let handler = self
            .registry
            .entries_with(Capability::LocalNotificationHandler)
            .filter_map(|entry| entry.daemon().as_local_notification_handler())
            .find(|handler| handler.category() == category);

        match handler {
            Some(handler) => handler.handle_local_notification(notification.user_info.as_ref()),
            None => debug!(category, "no local notification daemon for category"),
        }
    }

    /// Route a local notification action to the first daemon owning its
    /// category.
    ///
    /// When no daemon owns the category (or the notification has none),
    /// `on_complete` runs immediately.
    pub fn dispatch_local_notification_action<F>(
        &self,
        notification: &LocalNotification,
        action_id: Option<&str>,
        on_complete: F,
    ) where
        F: FnOnce() + Send + 'static,
    {
        let Some(category) = notification.category.as_deref() else {
            debug!(action_id = ?action_id, "local notification action without category");
            on_complete();
            return;
        };
        debug!(
            category,
            action_id = ?action_id,
            user_info = ?notification.user_info,
            "local notification action received"
        );

        let handler = self
            .registry
            .entries_with(Capability::LocalActionHandler)
            .filter_map(|entry| entry.daemon().as_local_action_handler())
            .find(|handler| handler.category() == category);

        match handler {
            Some(handler) => handler.handle_local_action(
                action_id,
                notification.user_info.as_ref(),
                Box::new(on_complete),
            ),
            None => {
                debug!(category, action_id = ?action_id, "no local action daemon for category");
                on_complete();
            }
        }
    }

    // ------------------------------------------------------------------
    // Remote notifications
    // ------------------------------------------------------------------

    /// Route a push payload to the daemon owning `aps.category`.
    ///
    /// Payloads without a category are routed under the configured sentinel
    /// (`no.category` by default). When nothing handles the push, or the
    /// payload is not a JSON object, `on_complete` receives
    /// [`FetchResult::NoData`].
    pub fn dispatch_remote_notification<F>(&self, payload: &JsonValue, on_complete: F)
    where
        F: FnOnce(FetchResult) + Send + 'static,
    {
        if !payload.is_object() {
            debug!(payload = %payload, "remote notification payload is not an object");
            on_complete(FetchResult::NoData);
            return;
        }

        let category = match payload
            .get("aps")
            .and_then(|aps| aps.get("category"))
            .and_then(JsonValue::as_str)
        {
            Some(category) => {
                debug!(category, payload = %payload, "remote notification received");
                category
            }
            None => {
                debug!(payload = %payload, "remote notification received without category");
                self.registry.config().no_category.as_str()
            }
        };

        let handler = self
            .registry
            .entries_with(Capability::RemoteNotificationHandler)
            .filter_map(|entry| entry.daemon().as_remote_notification_handler())
            .find(|handler| handler.category() == category);

        match handler {
            Some(handler) => handler.handle_remote_notification(payload, Box::new(on_complete)),
            None => {
                debug!(category, "unable to handle remote notification");
                on_complete(FetchResult::NoData);
            }
        }
    }

    // ------------------------------------------------------------------
    // Push tokens
    // ------------------------------------------------------------------

    /// Broadcast a registered device token.
    pub fn dispatch_token_registered(&self, token: &Token) {
        debug!(token = %token, "device token registered");
        for entry in self.registry.entries_with(Capability::DeviceTokenHandler) {
            if let Some(handler) = entry.daemon().as_device_token_handler() {
                trace!(daemon = entry.daemon().name(), "delivering device token");
                handler.device_token_registered(token);
            }
        }
    }

    /// Broadcast push token invalidation.
    pub fn dispatch_token_invalidated(&self) {
        debug!("push token invalidated");
        for entry in self.registry.entries_with(Capability::RemoteNotificationErrorHandler) {
            if let Some(handler) = entry.daemon().as_remote_notification_error_handler() {
                trace!(daemon = entry.daemon().name(), "delivering token invalidation");
                handler.did_invalidate_push_token();
            }
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Broadcast a lifecycle phase.
    ///
    /// `metadata` carries the launch options for [`LifecyclePhase::Launched`]
    /// and is only logged for the other phases.
    pub fn dispatch_lifecycle(&self, phase: LifecyclePhase, metadata: Option<&JsonValue>) {
        debug!(%phase, metadata = ?metadata, "application lifecycle");

        for entry in self.registry.entries_with(Capability::LifecycleObserver) {
            let Some(observer) = entry.daemon().as_lifecycle_observer() else {
                continue;
            };
            trace!(daemon = entry.daemon().name(), %phase, "delivering lifecycle phase");
            match phase {
                LifecyclePhase::Launched => observer.did_finish_launching(metadata),
                LifecyclePhase::WillResignActive => observer.will_resign_active(),
                LifecyclePhase::DidEnterBackground => observer.did_enter_background(),
                LifecyclePhase::WillEnterForeground => observer.will_enter_foreground(),
                LifecyclePhase::DidBecomeActive => observer.did_become_active(),
                LifecyclePhase::WillTerminate => observer.will_terminate(),
            }
        }
    }
}

impl Drop for EventRouter {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.signals.unsubscribe(id);
        }
    }
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("registry", &self.registry)
            .field("subscription_count", &self.subscriptions.len())
            .finish()
    }
}
