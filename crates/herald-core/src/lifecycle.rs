//! Application lifecycle phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The six lifecycle transitions broadcast to every
/// [`LifecycleObserver`](crate::daemon::LifecycleObserver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    /// Finished launching; metadata carries the launch options
    Launched,
    /// About to become inactive
    WillResignActive,
    /// Entered the background
    DidEnterBackground,
    /// Returning from the background
    WillEnterForeground,
    /// Became active
    DidBecomeActive,
    /// About to terminate
    WillTerminate,
}

impl LifecyclePhase {
    /// Every phase, in the order a full run of the application visits them.
    pub const ALL: [LifecyclePhase; 6] = [
        Self::Launched,
        Self::WillResignActive,
        Self::DidEnterBackground,
        Self::WillEnterForeground,
        Self::DidBecomeActive,
        Self::WillTerminate,
    ];

    /// Parse a phase from its snake_case name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.as_str() == s)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Launched => "launched",
            Self::WillResignActive => "will_resign_active",
            Self::DidEnterBackground => "did_enter_background",
            Self::WillEnterForeground => "will_enter_foreground",
            Self::DidBecomeActive => "did_become_active",
            Self::WillTerminate => "will_terminate",
        }
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
