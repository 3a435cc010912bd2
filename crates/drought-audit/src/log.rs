//! Notification log backends.
//!
//! This module provides the [`NotificationLog`] trait and an in-memory
//! reference implementation. Production deployments implement the trait over
//! their durable store, typically a `notification_log` table.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::event::NotificationEvent;

/// Trait for append-only notification log backends.
///
/// Implementations must never update or delete past events; the gate relies
/// only on reading the most recent event per `(trigger_id, user_id)` pair
/// and appending new ones.
pub trait NotificationLog: Send + Sync {
    /// Returns the most recent event for the pair, by `sent_at`.
    fn latest(&self, trigger_id: i64, user_id: i64) -> Result<Option<NotificationEvent>>;

    /// Appends a new event.
    fn append(&self, event: NotificationEvent) -> Result<()>;
}

/// In-memory notification log.
///
/// Events are kept per `(trigger_id, user_id)` pair in append order.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationLog {
    events: Arc<RwLock<HashMap<(i64, i64), Vec<NotificationEvent>>>>,
}

impl MemoryNotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().values().map(Vec::len).sum()
    }

    /// Returns true if no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All events for a pair, in append order.
    #[must_use]
    pub fn history(&self, trigger_id: i64, user_id: i64) -> Vec<NotificationEvent> {
        self.events
            .read()
            .get(&(trigger_id, user_id))
            .cloned()
            .unwrap_or_default()
    }
}

impl NotificationLog for MemoryNotificationLog {
    fn latest(&self, trigger_id: i64, user_id: i64) -> Result<Option<NotificationEvent>> {
        let events = self.events.read();
        Ok(events
            .get(&(trigger_id, user_id))
            .and_then(|entries| entries.iter().max_by_key(|e| e.sent_at))
            .cloned())
    }

    fn append(&self, event: NotificationEvent) -> Result<()> {
        let mut events = self.events.write();
        events
            .entry((event.trigger_id, event.user_id))
            .or_default()
            .push(event);
        Ok(())
    }
}

/// A boxed notification log for dynamic dispatch.
pub type BoxedNotificationLog = Box<dyn NotificationLog>;

impl NotificationLog for BoxedNotificationLog {
    fn latest(&self, trigger_id: i64, user_id: i64) -> Result<Option<NotificationEvent>> {
        (**self).latest(trigger_id, user_id)
    }

    fn append(&self, event: NotificationEvent) -> Result<()> {
        (**self).append(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NotificationType;
    use chrono::{Duration, Utc};

    fn event_at(trigger_id: i64, user_id: i64, hours_ago: i64) -> NotificationEvent {
        NotificationEvent::sent_at(
            trigger_id,
            user_id,
            NotificationType::Email,
            &[],
            Utc::now() - Duration::hours(hours_ago),
        )
        .unwrap()
    }

    #[test]
    fn empty_log_has_no_latest() {
        let log = MemoryNotificationLog::new();
        assert!(log.latest(1, 2).unwrap().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn append_then_latest() {
        let log = MemoryNotificationLog::new();
        let event = event_at(1, 2, 3);
        log.append(event.clone()).unwrap();

        assert_eq!(log.latest(1, 2).unwrap(), Some(event));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn latest_returns_most_recent_by_sent_at() {
        let log = MemoryNotificationLog::new();
        let old = event_at(1, 2, 10);
        let recent = event_at(1, 2, 1);
        // Append out of chronological order.
        log.append(recent.clone()).unwrap();
        log.append(old).unwrap();

        assert_eq!(log.latest(1, 2).unwrap(), Some(recent));
    }

    #[test]
    fn pairs_are_isolated() {
        let log = MemoryNotificationLog::new();
        log.append(event_at(1, 2, 1)).unwrap();

        assert!(log.latest(1, 3).unwrap().is_none());
        assert!(log.latest(9, 2).unwrap().is_none());
    }

    #[test]
    fn history_preserves_append_order() {
        let log = MemoryNotificationLog::new();
        let first = event_at(1, 2, 5);
        let second = event_at(1, 2, 2);
        log.append(first.clone()).unwrap();
        log.append(second.clone()).unwrap();

        assert_eq!(log.history(1, 2), vec![first, second]);
    }

    #[test]
    fn log_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryNotificationLog>();
    }

    #[test]
    fn boxed_log_works() {
        let boxed: BoxedNotificationLog = Box::new(MemoryNotificationLog::new());
        boxed.append(event_at(1, 2, 0)).unwrap();
        assert!(boxed.latest(1, 2).unwrap().is_some());
    }
}
