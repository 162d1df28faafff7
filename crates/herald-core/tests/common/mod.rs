//! Test daemons shared by the integration suites.
//!
//! Every daemon writes `"<name>:<event>"` into a shared [`CallLog`] so tests
//! can assert both which daemons ran and in what order.

#![allow(dead_code)]

use herald_core::{
    ActionCompletion, Capability, CapabilitySet, Daemon, DeviceTokenHandler, FetchCompletion,
    Fragments, LifecycleObserver, LocalActionHandler, LocalNotificationHandler, QueryParams,
    RemoteNotificationErrorHandler, RemoteNotificationHandler, Signal, SignalCallback,
    SignalObserver, Token, UrlHandler,
};
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use url::Url;

/// Shared, ordered record of daemon invocations.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().clone()
}

// ============================================================================
// Lifecycle and signal daemons
// ============================================================================

/// Lifecycle observer only.
pub struct Foo {
    pub log: CallLog,
}

impl LifecycleObserver for Foo {
    fn did_finish_launching(&self, launch_options: Option<&JsonValue>) {
        let detail = launch_options.map(|o| o.to_string()).unwrap_or_default();
        self.log.lock().push(format!("foo:launched{detail}"));
    }

    fn will_resign_active(&self) {
        self.log.lock().push("foo:will_resign_active".to_string());
    }

    fn did_enter_background(&self) {
        self.log.lock().push("foo:did_enter_background".to_string());
    }

    fn will_enter_foreground(&self) {
        self.log.lock().push("foo:will_enter_foreground".to_string());
    }

    fn did_become_active(&self) {
        self.log.lock().push("foo:did_become_active".to_string());
    }

    fn will_terminate(&self) {
        self.log.lock().push("foo:will_terminate".to_string());
    }
}

impl Daemon for Foo {
    fn name(&self) -> &str {
        "foo"
    }

    fn as_lifecycle_observer(&self) -> Option<&dyn LifecycleObserver> {
        Some(self)
    }
}

/// Lifecycle observer recording `"<name>:<method>"` for every method.
pub struct Watcher {
    pub name: &'static str,
    pub log: CallLog,
}

impl Watcher {
    fn record(&self, method: &str) {
        self.log.lock().push(format!("{}:{method}", self.name));
    }
}

impl LifecycleObserver for Watcher {
    fn did_finish_launching(&self, _launch_options: Option<&JsonValue>) {
        self.record("did_finish_launching");
    }

    fn will_resign_active(&self) {
        self.record("will_resign_active");
    }

    fn did_enter_background(&self) {
        self.record("did_enter_background");
    }

    fn will_enter_foreground(&self) {
        self.record("will_enter_foreground");
    }

    fn did_become_active(&self) {
        self.record("did_become_active");
    }

    fn will_terminate(&self) {
        self.record("will_terminate");
    }
}

impl Daemon for Watcher {
    fn name(&self) -> &str {
        self.name
    }

    fn as_lifecycle_observer(&self) -> Option<&dyn LifecycleObserver> {
        Some(self)
    }
}

/// Signal observer only.
pub struct Bar {
    pub log: CallLog,
}

impl SignalObserver for Bar {
    fn signal_handlers(&self) -> Vec<(String, SignalCallback)> {
        let log = Arc::clone(&self.log);
        let callback: SignalCallback =
            Arc::new(move |signal: &Signal| log.lock().push(format!("bar:{}", signal.name)));
        vec![("Ping".to_string(), callback)]
    }
}

impl Daemon for Bar {
    fn name(&self) -> &str {
        "bar"
    }

    fn as_signal_observer(&self) -> Option<&dyn SignalObserver> {
        Some(self)
    }
}

/// Signal observer and lifecycle observer.
pub struct Baz {
    pub log: CallLog,
}

impl LifecycleObserver for Baz {
    fn did_become_active(&self) {
        self.log.lock().push("baz:did_become_active".to_string());
    }
}

impl SignalObserver for Baz {
    fn signal_handlers(&self) -> Vec<(String, SignalCallback)> {
        let ping_log = Arc::clone(&self.log);
        let pong_log = Arc::clone(&self.log);
        let ping: SignalCallback =
            Arc::new(move |signal: &Signal| ping_log.lock().push(format!("baz:{}", signal.name)));
        let pong: SignalCallback =
            Arc::new(move |signal: &Signal| pong_log.lock().push(format!("baz:{}", signal.name)));
        vec![("Ping".to_string(), ping), ("Pong".to_string(), pong)]
    }
}

impl Daemon for Baz {
    fn name(&self) -> &str {
        "baz"
    }

    fn as_lifecycle_observer(&self) -> Option<&dyn LifecycleObserver> {
        Some(self)
    }

    fn as_signal_observer(&self) -> Option<&dyn SignalObserver> {
        Some(self)
    }
}

// ============================================================================
// URL daemon
// ============================================================================

/// URL handler with a fixed result and a record of the last match.
pub struct Link {
    pub name: &'static str,
    pub host: &'static str,
    pub path: &'static str,
    pub result: bool,
    pub log: CallLog,
    pub last: Mutex<Option<(Fragments, QueryParams)>>,
}

impl Link {
    pub fn new(name: &'static str, host: &'static str, path: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            host,
            path,
            result: true,
            log: Arc::clone(log),
            last: Mutex::new(None),
        }
    }

    pub fn declining(mut self) -> Self {
        self.result = false;
        self
    }

    pub fn last_match(&self) -> Option<(Fragments, QueryParams)> {
        self.last.lock().clone()
    }
}

impl UrlHandler for Link {
    fn url_host(&self) -> &str {
        self.host
    }

    fn url_path(&self) -> &str {
        self.path
    }

    fn handle_url(&self, _url: &Url, fragments: &Fragments, query: &QueryParams) -> bool {
        self.log.lock().push(format!("{}:url", self.name));
        *self.last.lock() = Some((fragments.clone(), query.clone()));
        self.result
    }
}

impl Daemon for Link {
    fn name(&self) -> &str {
        self.name
    }

    fn as_url_handler(&self) -> Option<&dyn UrlHandler> {
        Some(self)
    }
}

// ============================================================================
// Notification daemons
// ============================================================================

/// Local, action and remote handler for one category.
///
/// Completions are either called right away or parked for the test to run.
pub struct Inbox {
    pub name: &'static str,
    pub category: &'static str,
    pub log: CallLog,
    pub complete_immediately: bool,
    pub parked_actions: Mutex<Vec<ActionCompletion>>,
    pub parked_fetches: Mutex<Vec<FetchCompletion>>,
}

impl Inbox {
    pub fn new(name: &'static str, category: &'static str, log: &CallLog) -> Self {
        Self {
            name,
            category,
            log: Arc::clone(log),
            complete_immediately: true,
            parked_actions: Mutex::new(Vec::new()),
            parked_fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn deferred(mut self) -> Self {
        self.complete_immediately = false;
        self
    }
}

impl LocalNotificationHandler for Inbox {
    fn category(&self) -> &str {
        self.category
    }

    fn handle_local_notification(&self, user_info: Option<&JsonValue>) {
        let detail = user_info.map(|u| u.to_string()).unwrap_or_default();
        self.log.lock().push(format!("{}:local{detail}", self.name));
    }
}

impl LocalActionHandler for Inbox {
    fn category(&self) -> &str {
        self.category
    }

    fn handle_local_action(
        &self,
        identifier: Option<&str>,
        _user_info: Option<&JsonValue>,
        completion: ActionCompletion,
    ) {
        self.log
            .lock()
            .push(format!("{}:action:{}", self.name, identifier.unwrap_or("-")));
        if self.complete_immediately {
            completion();
        } else {
            self.parked_actions.lock().push(completion);
        }
    }
}

impl RemoteNotificationHandler for Inbox {
    fn category(&self) -> &str {
        self.category
    }

    fn handle_remote_notification(&self, _payload: &JsonValue, completion: FetchCompletion) {
        self.log.lock().push(format!("{}:remote", self.name));
        if self.complete_immediately {
            completion(herald_core::FetchResult::NewData);
        } else {
            self.parked_fetches.lock().push(completion);
        }
    }
}

impl Daemon for Inbox {
    fn name(&self) -> &str {
        self.name
    }

    fn as_local_notification_handler(&self) -> Option<&dyn LocalNotificationHandler> {
        Some(self)
    }

    fn as_local_action_handler(&self) -> Option<&dyn LocalActionHandler> {
        Some(self)
    }

    fn as_remote_notification_handler(&self) -> Option<&dyn RemoteNotificationHandler> {
        Some(self)
    }
}

/// Token registration and invalidation listener.
pub struct Push {
    pub name: &'static str,
    pub log: CallLog,
}

impl DeviceTokenHandler for Push {
    fn device_token_registered(&self, token: &Token) {
        self.log
            .lock()
            .push(format!("{}:token:{}", self.name, token.to_hex()));
    }
}

impl RemoteNotificationErrorHandler for Push {
    fn did_invalidate_push_token(&self) {
        self.log.lock().push(format!("{}:invalidated", self.name));
    }
}

impl Daemon for Push {
    fn name(&self) -> &str {
        self.name
    }

    fn as_device_token_handler(&self) -> Option<&dyn DeviceTokenHandler> {
        Some(self)
    }

    fn as_remote_notification_error_handler(&self) -> Option<&dyn RemoteNotificationErrorHandler> {
        Some(self)
    }
}

// ============================================================================
// Arbitrary capability mix
// ============================================================================

/// Daemon exposing exactly the capabilities in `mask`.
pub struct MaskDaemon {
    pub mask: CapabilitySet,
}

impl MaskDaemon {
    pub fn new(mask: CapabilitySet) -> Self {
        Self { mask }
    }

    fn exposes(&self, capability: Capability) -> bool {
        self.mask.has(capability)
    }
}

impl LifecycleObserver for MaskDaemon {}

impl UrlHandler for MaskDaemon {
    fn url_host(&self) -> &str {
        "mask.example.com"
    }

    fn url_path(&self) -> &str {
        ""
    }

    fn handle_url(&self, _url: &Url, _fragments: &Fragments, _query: &QueryParams) -> bool {
        true
    }
}

impl LocalNotificationHandler for MaskDaemon {
    fn category(&self) -> &str {
        "mask"
    }

    fn handle_local_notification(&self, _user_info: Option<&JsonValue>) {}
}

impl LocalActionHandler for MaskDaemon {
    fn category(&self) -> &str {
        "mask"
    }

    fn handle_local_action(
        &self,
        _identifier: Option<&str>,
        _user_info: Option<&JsonValue>,
        completion: ActionCompletion,
    ) {
        completion();
    }
}

impl RemoteNotificationHandler for MaskDaemon {
    fn category(&self) -> &str {
        "mask"
    }

    fn handle_remote_notification(&self, _payload: &JsonValue, completion: FetchCompletion) {
        completion(herald_core::FetchResult::NoData);
    }
}

impl RemoteNotificationErrorHandler for MaskDaemon {
    fn did_invalidate_push_token(&self) {}
}

impl DeviceTokenHandler for MaskDaemon {
    fn device_token_registered(&self, _token: &Token) {}
}

impl SignalObserver for MaskDaemon {
    fn signal_handlers(&self) -> Vec<(String, SignalCallback)> {
        Vec::new()
    }
}

impl Daemon for MaskDaemon {
    fn as_lifecycle_observer(&self) -> Option<&dyn LifecycleObserver> {
        self.exposes(Capability::LifecycleObserver).then_some(self as &dyn LifecycleObserver)
    }

    fn as_url_handler(&self) -> Option<&dyn UrlHandler> {
        self.exposes(Capability::UrlHandler).then_some(self as &dyn UrlHandler)
    }

    fn as_local_notification_handler(&self) -> Option<&dyn LocalNotificationHandler> {
        self.exposes(Capability::LocalNotificationHandler)
            .then_some(self as &dyn LocalNotificationHandler)
    }

    fn as_local_action_handler(&self) -> Option<&dyn LocalActionHandler> {
        self.exposes(Capability::LocalActionHandler).then_some(self as &dyn LocalActionHandler)
    }

    fn as_remote_notification_handler(&self) -> Option<&dyn RemoteNotificationHandler> {
        self.exposes(Capability::RemoteNotificationHandler)
            .then_some(self as &dyn RemoteNotificationHandler)
    }

    fn as_remote_notification_error_handler(&self) -> Option<&dyn RemoteNotificationErrorHandler> {
        self.exposes(Capability::RemoteNotificationErrorHandler)
            .then_some(self as &dyn RemoteNotificationErrorHandler)
    }

    fn as_device_token_handler(&self) -> Option<&dyn DeviceTokenHandler> {
        self.exposes(Capability::DeviceTokenHandler).then_some(self as &dyn DeviceTokenHandler)
    }

    fn as_signal_observer(&self) -> Option<&dyn SignalObserver> {
        self.exposes(Capability::SignalObserver).then_some(self as &dyn SignalObserver)
    }
}
