//! Persistent notifications
//!
//! In-memory store for the one-time user-visible alerts the integration
//! raises (today: the first login failure). Keyed by notification id, so a
//! repeat notify with the same id overwrites instead of stacking.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

/// Notification id used for login failures
pub const CONNECT_NOTIFICATION_ID: &str = "aarlo_notification";
/// Title for login failure notifications
pub const CONNECT_NOTIFICATION_TITLE: &str = "Arlo Component Setup";

/// A user-visible notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Where user-visible alerts go.
///
/// The integration ships the in-memory [`PersistentNotifications`]; an
/// embedding frontend can supply its own sink instead.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification_id: &str, title: &str, message: &str);

    fn dismiss(&self, notification_id: &str);
}

/// In-memory notification store
#[derive(Debug, Default)]
pub struct PersistentNotifications {
    notifications: DashMap<String, Notification>,
}

impl PersistentNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, notification_id: &str) -> Option<Notification> {
        self.notifications
            .get(notification_id)
            .map(|r| r.value().clone())
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications
            .iter()
            .map(|r| r.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl NotificationSink for PersistentNotifications {
    fn notify(&self, notification_id: &str, title: &str, message: &str) {
        let replaced = self
            .notifications
            .insert(
                notification_id.to_string(),
                Notification {
                    notification_id: notification_id.to_string(),
                    title: title.to_string(),
                    message: message.to_string(),
                    created_at: Utc::now(),
                },
            )
            .is_some();
        if replaced {
            debug!(notification_id, "updated notification");
        } else {
            info!(notification_id, "created notification");
        }
    }

    fn dismiss(&self, notification_id: &str) {
        if self.notifications.remove(notification_id).is_some() {
            info!(notification_id, "dismissed notification");
        }
    }
}
