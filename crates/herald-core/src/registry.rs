//! Capability registry.
//!
//! Holds every registered daemon in registration order, plus one index list
//! per capability so lookups never re-filter the whole registry.
//!
//! ```text
//! entries: [foo, bar, baz]          (append-only, positions never change)
//! index[LifecycleObserver]: [0, 2]
//! index[SignalObserver]:    [1, 2]
//! ```
//!
//! Entries are never removed; the registry lives as long as the process.

use herald_config::DispatchConfig;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::capability::{Capability, CapabilitySet};
use crate::daemon::Daemon;
use crate::link::UrlPattern;

/// Position of an entry in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DaemonId(usize);

impl DaemonId {
    /// Registration position, starting at zero.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DaemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "daemon-{}", self.0)
    }
}

/// A registered daemon with the data derived from it at registration.
pub struct DaemonEntry {
    id: DaemonId,
    daemon: Arc<dyn Daemon>,
    capabilities: CapabilitySet,
    url_pattern: Option<UrlPattern>,
}

impl DaemonEntry {
    /// Registration id.
    pub fn id(&self) -> DaemonId {
        self.id
    }

    /// The daemon handle.
    pub fn daemon(&self) -> &Arc<dyn Daemon> {
        &self.daemon
    }

    /// Capabilities probed at registration.
    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    /// Compiled URL pattern, present for URL handlers.
    pub fn url_pattern(&self) -> Option<&UrlPattern> {
        self.url_pattern.as_ref()
    }
}

impl fmt::Debug for DaemonEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaemonEntry")
            .field("id", &self.id)
            .field("name", &self.daemon.name())
            .field("capabilities", &self.capabilities)
            .field("url_pattern", &self.url_pattern)
            .finish()
    }
}

/// Ordered daemon set with per-capability lookup.
pub struct CapabilityRegistry {
    entries: Vec<DaemonEntry>,
    index: [Vec<usize>; Capability::COUNT],
    config: DispatchConfig,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityRegistry {
    /// Create an empty registry with default settings.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Create an empty registry.
    ///
    /// An invalid `config` (see [`DispatchConfig::validate`]) is logged and
    /// replaced by the defaults.
    pub fn with_config(config: DispatchConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "invalid dispatch configuration, using defaults");
                DispatchConfig::default()
            }
        };

        Self {
            entries: Vec::new(),
            index: Default::default(),
            config,
        }
    }

    /// Settings the registry was built with.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Append a daemon.
    ///
    /// Registering the same handle twice appends a second entry; it will then
    /// be returned twice by [`query`](Self::query).
    pub fn register(&mut self, daemon: Arc<dyn Daemon>) -> DaemonId {
        let id = DaemonId(self.entries.len());
        let capabilities = CapabilitySet::probe(daemon.as_ref());

        let url_pattern = daemon.as_url_handler().map(|handler| {
            UrlPattern::parse_with_marker(
                handler.url_host(),
                handler.url_path(),
                self.config.capture_marker,
            )
        });

        if let Some(pattern) = url_pattern.as_ref().filter(|p| !p.host_is_normalized()) {
            warn!(
                daemon = daemon.name(),
                host = pattern.host(),
                "URL host has uppercase or non-ASCII characters; http(s) URLs arrive \
                 lowercased and punycoded and will never match it"
            );
        }

        if self.config.warn_on_duplicate_captures {
            if let Some(pattern) = &url_pattern {
                let duplicates = pattern.duplicate_captures();
                if !duplicates.is_empty() {
                    warn!(
                        daemon = daemon.name(),
                        captures = ?duplicates,
                        "URL pattern repeats capture names; the last segment wins"
                    );
                }
            }
        }

        if self.config.warn_on_category_collision {
            self.warn_category_collisions(daemon.as_ref());
        }

        for capability in capabilities.capabilities() {
            self.index[capability.index()].push(id.0);
        }

        debug!(
            daemon = daemon.name(),
            %id,
            capabilities = ?capabilities,
            "registered daemon"
        );

        self.entries.push(DaemonEntry {
            id,
            daemon,
            capabilities,
            url_pattern,
        });
        id
    }

    /// Every daemon implementing `capability`, in registration order.
    pub fn query(&self, capability: Capability) -> Vec<Arc<dyn Daemon>> {
        self.entries_with(capability)
            .map(|entry| Arc::clone(&entry.daemon))
            .collect()
    }

    /// Entries implementing `capability`, in registration order.
    pub fn entries_with(&self, capability: Capability) -> impl Iterator<Item = &DaemonEntry> {
        self.index[capability.index()]
            .iter()
            .map(move |&position| &self.entries[position])
    }

    /// Number of daemons implementing `capability`.
    pub fn count(&self, capability: Capability) -> usize {
        self.index[capability.index()].len()
    }

    /// Capabilities of a registered daemon.
    pub fn capabilities_of(&self, id: DaemonId) -> Option<CapabilitySet> {
        self.entries.get(id.0).map(|entry| entry.capabilities)
    }

    /// Entry by id.
    pub fn get(&self, id: DaemonId) -> Option<&DaemonEntry> {
        self.entries.get(id.0)
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DaemonEntry> {
        self.entries.iter()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Two handlers of the same kind claiming one category: the earlier one
    // receives every event, so the later one is unreachable for it.
    fn warn_category_collisions(&self, daemon: &dyn Daemon) {
        if let Some(handler) = daemon.as_local_notification_handler() {
            let category = handler.category();
            if let Some(existing) = self
                .entries_with(Capability::LocalNotificationHandler)
                .find(|e| {
                    e.daemon
                        .as_local_notification_handler()
                        .is_some_and(|h| h.category() == category)
                })
            {
                self.warn_collision(Capability::LocalNotificationHandler, category, existing, daemon);
            }
        }

        if let Some(handler) = daemon.as_local_action_handler() {
            let category = handler.category();
            if let Some(existing) = self.entries_with(Capability::LocalActionHandler).find(|e| {
                e.daemon
                    .as_local_action_handler()
                    .is_some_and(|h| h.category() == category)
            }) {
                self.warn_collision(Capability::LocalActionHandler, category, existing, daemon);
            }
        }

        if let Some(handler) = daemon.as_remote_notification_handler() {
            let category = handler.category();
            if let Some(existing) = self
                .entries_with(Capability::RemoteNotificationHandler)
                .find(|e| {
                    e.daemon
                        .as_remote_notification_handler()
                        .is_some_and(|h| h.category() == category)
                })
            {
                self.warn_collision(Capability::RemoteNotificationHandler, category, existing, daemon);
            }
        }
    }

    fn warn_collision(
        &self,
        capability: Capability,
        category: &str,
        existing: &DaemonEntry,
        daemon: &dyn Daemon,
    ) {
        warn!(
            %capability,
            category,
            winner = existing.daemon.name(),
            shadowed = daemon.name(),
            "category already claimed; the earlier registration handles it"
        );
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("daemon_count", &self.entries.len())
            .field("entries", &self.entries)
            .finish()
    }
}
