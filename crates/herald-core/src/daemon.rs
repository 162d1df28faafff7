//! Daemon and capability traits.
//!
//! A daemon is any long-lived `Send + Sync` value registered with the
//! [`EventRouter`](crate::router::EventRouter). It opts into event kinds by
//! implementing capability traits and returning `Some(self)` from the matching
//! `as_*` accessor on [`Daemon`]:
//!
//! ```rust
//! use herald_core::{Daemon, LifecycleObserver};
//!
//! struct Analytics;
//!
//! impl LifecycleObserver for Analytics {
//!     fn did_become_active(&self) {
//!         // start a session
//!     }
//! }
//!
//! impl Daemon for Analytics {
//!     fn as_lifecycle_observer(&self) -> Option<&dyn LifecycleObserver> {
//!         Some(self)
//!     }
//! }
//! ```
//!
//! Accessors are consulted once at registration; a daemon's capability set is
//! fixed from then on.

use serde_json::Value as JsonValue;
use std::sync::Arc;
use url::Url;

use crate::link::{Fragments, QueryParams};
use crate::notification::{ActionCompletion, FetchCompletion};
use crate::signal::SignalCallback;
use crate::token::Token;

/// A participant registered with the router.
pub trait Daemon: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Lifecycle capability.
    fn as_lifecycle_observer(&self) -> Option<&dyn LifecycleObserver> {
        None
    }

    /// Deep-link capability.
    fn as_url_handler(&self) -> Option<&dyn UrlHandler> {
        None
    }

    /// Local notification capability.
    fn as_local_notification_handler(&self) -> Option<&dyn LocalNotificationHandler> {
        None
    }

    /// Local notification action capability.
    fn as_local_action_handler(&self) -> Option<&dyn LocalActionHandler> {
        None
    }

    /// Remote notification capability.
    fn as_remote_notification_handler(&self) -> Option<&dyn RemoteNotificationHandler> {
        None
    }

    /// Push token invalidation capability.
    fn as_remote_notification_error_handler(&self) -> Option<&dyn RemoteNotificationErrorHandler> {
        None
    }

    /// Push token registration capability.
    fn as_device_token_handler(&self) -> Option<&dyn DeviceTokenHandler> {
        None
    }

    /// Named signal capability.
    fn as_signal_observer(&self) -> Option<&dyn SignalObserver> {
        None
    }
}

/// Application state changes. Every method defaults to a no-op.
pub trait LifecycleObserver: Send + Sync {
    /// The application finished launching with the given launch options.
    fn did_finish_launching(&self, _launch_options: Option<&JsonValue>) {}

    /// The application is moving to the inactive or background state.
    fn will_resign_active(&self) {}

    /// The application entered the background.
    fn did_enter_background(&self) {}

    /// The application is returning to the foreground from the background.
    fn will_enter_foreground(&self) {}

    /// The application became active.
    fn did_become_active(&self) {}

    /// The application is about to terminate.
    fn will_terminate(&self) {}
}

/// Handles deep-link URLs for one host + path pattern.
pub trait UrlHandler: Send + Sync {
    /// Host the URL must have, e.g. `foo.example.com` for
    /// `myapp://foo.example.com/bar?boo=baz`.
    ///
    /// Compared exactly against [`Url::host_str`]. For special schemes
    /// (`http`, `https`, ...) that host is already lowercased and punycoded,
    /// so a host with uppercase or non-ASCII characters only ever matches
    /// custom-scheme URLs. Registration logs a warning for such hosts.
    fn url_host(&self) -> &str;

    /// Path pattern, e.g. `/bar` or `/bar/:mdn`. Segments starting with the
    /// capture marker bind the matching URL segment under that name.
    fn url_path(&self) -> &str;

    /// Handle a matched URL. Returns `true` if handled.
    fn handle_url(&self, url: &Url, fragments: &Fragments, query: &QueryParams) -> bool;
}

/// Handles local notifications of one category.
pub trait LocalNotificationHandler: Send + Sync {
    /// Category this handler owns.
    fn category(&self) -> &str;

    /// Handle a notification with its attached user info.
    fn handle_local_notification(&self, user_info: Option<&JsonValue>);
}

/// Handles the action buttons of local notifications of one category.
pub trait LocalActionHandler: Send + Sync {
    /// Category this handler owns.
    fn category(&self) -> &str;

    /// Handle the tapped action. `completion` must be called once the work is
    /// done.
    fn handle_local_action(
        &self,
        identifier: Option<&str>,
        user_info: Option<&JsonValue>,
        completion: ActionCompletion,
    );
}

/// Handles remote (push) notifications of one category.
///
/// Categories must be unique across remote notification daemons; when two
/// daemons claim the same category the first registered receives every push.
pub trait RemoteNotificationHandler: Send + Sync {
    /// Category as sent by the server in `aps.category`.
    fn category(&self) -> &str;

    /// Handle the push payload. `completion` must be called once processing
    /// finishes.
    fn handle_remote_notification(&self, payload: &JsonValue, completion: FetchCompletion);
}

/// Notified when the push token is invalidated.
pub trait RemoteNotificationErrorHandler: Send + Sync {
    /// The current push token is no longer valid.
    fn did_invalidate_push_token(&self);
}

/// Notified when a device token is registered.
pub trait DeviceTokenHandler: Send + Sync {
    /// A token usable for targeting pushes was registered.
    fn device_token_registered(&self, token: &Token);
}

/// Subscribes to named signals.
pub trait SignalObserver: Send + Sync {
    /// Signal names mapped to their callbacks. Each pair is subscribed with the
    /// router's signal source when the daemon is registered.
    fn signal_handlers(&self) -> Vec<(String, SignalCallback)>;
}

/// Whether two handles point at the same daemon.
pub fn same_daemon<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}
