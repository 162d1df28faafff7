//! Capability tags and flag sets.
//!
//! A daemon's capabilities are probed once, when it is registered, and stored
//! as a [`CapabilitySet`]. Dispatch never re-probes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::daemon::Daemon;

/// Kinds of events a daemon can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Application lifecycle phases
    LifecycleObserver,
    /// Deep-link URLs
    UrlHandler,
    /// Local notifications for a category
    LocalNotificationHandler,
    /// Local notification actions for a category
    LocalActionHandler,
    /// Remote (push) notifications for a category
    RemoteNotificationHandler,
    /// Push token invalidation
    RemoteNotificationErrorHandler,
    /// Push token registration
    DeviceTokenHandler,
    /// Named signals from a [`SignalSource`](crate::signal::SignalSource)
    SignalObserver,
}

impl Capability {
    /// Number of capability kinds.
    pub const COUNT: usize = 8;

    /// Every capability, in declaration order.
    pub const ALL: [Capability; Self::COUNT] = [
        Self::LifecycleObserver,
        Self::UrlHandler,
        Self::LocalNotificationHandler,
        Self::LocalActionHandler,
        Self::RemoteNotificationHandler,
        Self::RemoteNotificationErrorHandler,
        Self::DeviceTokenHandler,
        Self::SignalObserver,
    ];

    /// Dense index, usable for per-capability tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The single-bit flag for this capability.
    pub fn flag(self) -> CapabilitySet {
        match self {
            Self::LifecycleObserver => CapabilitySet::LIFECYCLE_OBSERVER,
            Self::UrlHandler => CapabilitySet::URL_HANDLER,
            Self::LocalNotificationHandler => CapabilitySet::LOCAL_NOTIFICATION_HANDLER,
            Self::LocalActionHandler => CapabilitySet::LOCAL_ACTION_HANDLER,
            Self::RemoteNotificationHandler => CapabilitySet::REMOTE_NOTIFICATION_HANDLER,
            Self::RemoteNotificationErrorHandler => {
                CapabilitySet::REMOTE_NOTIFICATION_ERROR_HANDLER
            }
            Self::DeviceTokenHandler => CapabilitySet::DEVICE_TOKEN_HANDLER,
            Self::SignalObserver => CapabilitySet::SIGNAL_OBSERVER,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LifecycleObserver => "lifecycle_observer",
            Self::UrlHandler => "url_handler",
            Self::LocalNotificationHandler => "local_notification_handler",
            Self::LocalActionHandler => "local_action_handler",
            Self::RemoteNotificationHandler => "remote_notification_handler",
            Self::RemoteNotificationErrorHandler => "remote_notification_error_handler",
            Self::DeviceTokenHandler => "device_token_handler",
            Self::SignalObserver => "signal_observer",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

bitflags::bitflags! {
    /// Set of capabilities held by one daemon.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilitySet: u8 {
        /// See [`Capability::LifecycleObserver`]
        const LIFECYCLE_OBSERVER = 1 << 0;
        /// See [`Capability::UrlHandler`]
        const URL_HANDLER = 1 << 1;
        /// See [`Capability::LocalNotificationHandler`]
        const LOCAL_NOTIFICATION_HANDLER = 1 << 2;
        /// See [`Capability::LocalActionHandler`]
        const LOCAL_ACTION_HANDLER = 1 << 3;
        /// See [`Capability::RemoteNotificationHandler`]
        const REMOTE_NOTIFICATION_HANDLER = 1 << 4;
        /// See [`Capability::RemoteNotificationErrorHandler`]
        const REMOTE_NOTIFICATION_ERROR_HANDLER = 1 << 5;
        /// See [`Capability::DeviceTokenHandler`]
        const DEVICE_TOKEN_HANDLER = 1 << 6;
        /// See [`Capability::SignalObserver`]
        const SIGNAL_OBSERVER = 1 << 7;
    }
}

impl CapabilitySet {
    /// Probe a daemon's capability accessors.
    pub fn probe(daemon: &dyn Daemon) -> Self {
        let mut set = Self::empty();
        set.set(Self::LIFECYCLE_OBSERVER, daemon.as_lifecycle_observer().is_some());
        set.set(Self::URL_HANDLER, daemon.as_url_handler().is_some());
        set.set(
            Self::LOCAL_NOTIFICATION_HANDLER,
            daemon.as_local_notification_handler().is_some(),
        );
        set.set(Self::LOCAL_ACTION_HANDLER, daemon.as_local_action_handler().is_some());
        set.set(
            Self::REMOTE_NOTIFICATION_HANDLER,
            daemon.as_remote_notification_handler().is_some(),
        );
        set.set(
            Self::REMOTE_NOTIFICATION_ERROR_HANDLER,
            daemon.as_remote_notification_error_handler().is_some(),
        );
        set.set(Self::DEVICE_TOKEN_HANDLER, daemon.as_device_token_handler().is_some());
        set.set(Self::SIGNAL_OBSERVER, daemon.as_signal_observer().is_some());
        set
    }

    /// Whether the set holds `capability`.
    pub fn has(self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    /// Capabilities in the set, in declaration order.
    pub fn capabilities(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.has(*c))
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        capability.flag()
    }
}
