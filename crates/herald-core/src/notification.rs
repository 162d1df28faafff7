//! Notification event types and completion callbacks.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Completion for a local notification action.
pub type ActionCompletion = Box<dyn FnOnce() + Send>;

/// Completion for remote notification processing.
pub type FetchCompletion = Box<dyn FnOnce(FetchResult) + Send>;

/// Outcome reported through a [`FetchCompletion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchResult {
    /// New data was downloaded
    NewData,
    /// Nothing to download, or nobody handled the push
    NoData,
    /// Processing failed
    Failed,
}

/// A local notification delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalNotification {
    /// Category naming the owning handler; notifications without one are dropped
    #[serde(default)]
    pub category: Option<String>,

    /// Arbitrary payload attached by whoever scheduled the notification
    #[serde(default)]
    pub user_info: Option<JsonValue>,
}

impl LocalNotification {
    /// Notification for a category with no payload.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            user_info: None,
        }
    }

    /// Notification without a category.
    pub fn uncategorized() -> Self {
        Self::default()
    }

    /// Attach a payload.
    pub fn with_user_info(mut self, user_info: JsonValue) -> Self {
        self.user_info = Some(user_info);
        self
    }
}
