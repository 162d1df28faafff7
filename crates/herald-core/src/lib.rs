//! Herald dispatch core
//!
//! Long-lived components ("daemons") register with an [`EventRouter`] and
//! declare which kinds of application events they handle. The router routes
//! each incoming event to the daemons whose capabilities match.
//!
//! ## Architecture
//!
//! ```text
//! host event source
//!    │
//!    └── EventRouter ──► CapabilityRegistry (per-capability index)
//!           │
//!           ├── link::UrlPattern   (host + path matching, named captures)
//!           ├── link::parse_query  (query string → key/value map)
//!           └── SignalSource      (named-signal subscriptions)
//! ```
//!
//! ## Dispatch rules
//!
//! | Event | Capability | Rule |
//! |-------|------------|------|
//! | URL open | [`UrlHandler`] | first matching pattern wins |
//! | Local notification | [`LocalNotificationHandler`] | first matching category |
//! | Local action | [`LocalActionHandler`] | first matching category |
//! | Remote notification | [`RemoteNotificationHandler`] | first matching category |
//! | Token invalidated | [`RemoteNotificationErrorHandler`] | broadcast |
//! | Token registered | [`DeviceTokenHandler`] | broadcast |
//! | Lifecycle phase | [`LifecycleObserver`] | broadcast |
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use herald_core::{Daemon, EventRouter, Fragments, QueryParams, UrlHandler};
//! use url::Url;
//!
//! struct Profile;
//!
//! impl UrlHandler for Profile {
//!     fn url_host(&self) -> &str { "app.example.com" }
//!     fn url_path(&self) -> &str { "/profile/:id" }
//!     fn handle_url(&self, _url: &Url, fragments: &Fragments, _query: &QueryParams) -> bool {
//!         fragments.get("id").is_some()
//!     }
//! }
//!
//! impl Daemon for Profile {
//!     fn as_url_handler(&self) -> Option<&dyn UrlHandler> { Some(self) }
//! }
//!
//! let mut router = EventRouter::new();
//! router.register(Arc::new(Profile));
//!
//! let url = Url::parse("myapp://app.example.com/profile/42").unwrap();
//! assert!(router.dispatch_url_open(&url, None));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capability;
pub mod daemon;
pub mod lifecycle;
pub mod link;
pub mod notification;
pub mod registry;
pub mod router;
pub mod signal;
pub mod token;

pub use capability::{Capability, CapabilitySet};
pub use daemon::{
    same_daemon, Daemon, DeviceTokenHandler, LifecycleObserver, LocalActionHandler,
    LocalNotificationHandler, RemoteNotificationErrorHandler, RemoteNotificationHandler,
    SignalObserver, UrlHandler,
};
pub use lifecycle::LifecyclePhase;
pub use link::{match_url, parse_query, Fragments, PatternSegment, QueryParams, UrlPattern};
pub use notification::{ActionCompletion, FetchCompletion, FetchResult, LocalNotification};
pub use registry::{CapabilityRegistry, DaemonEntry, DaemonId};
pub use router::{EventRouter, SharedRouter};
pub use signal::{Signal, SignalCallback, SignalCenter, SignalSource, SubscriptionId};
pub use token::{Origin, Token};

pub use herald_config::{
    DispatchConfig, DEFAULT_CAPTURE_MARKER, DEFAULT_NO_CATEGORY as NO_CATEGORY,
};
