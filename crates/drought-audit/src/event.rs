//! Notification audit events.
//!
//! The log store collaborator owns the durable records; this module defines
//! their schema. Events are append-only: never updated or deleted.

use chrono::{DateTime, Utc};
use drought_alerts::ConditionResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

/// How a notification was (or will be) delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Email delivery.
    #[default]
    Email,
    /// SMS delivery.
    Sms,
    /// Webhook delivery.
    Webhook,
}

impl NotificationType {
    /// Returns the type as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Webhook => "webhook",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One durable record of a sent notification, keyed by trigger and user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Unique identifier for this event.
    pub id: Uuid,
    /// The trigger that fired.
    pub trigger_id: i64,
    /// The notified user.
    pub user_id: i64,
    /// When the notification was sent.
    pub sent_at: DateTime<Utc>,
    /// Delivery channel.
    pub notification_type: NotificationType,
    /// JSON snapshot of the conditions that were met at send time.
    pub conditions_met: String,
}

impl NotificationEvent {
    /// Creates a new event stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the met-conditions snapshot cannot be serialized.
    pub fn new(
        trigger_id: i64,
        user_id: i64,
        notification_type: NotificationType,
        conditions_met: &[ConditionResult],
    ) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            trigger_id,
            user_id,
            sent_at: Utc::now(),
            notification_type,
            conditions_met: serde_json::to_string(conditions_met)?,
        })
    }

    /// Creates an event with an explicit `sent_at`, for backfilling stores
    /// in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the met-conditions snapshot cannot be serialized.
    pub fn sent_at(
        trigger_id: i64,
        user_id: i64,
        notification_type: NotificationType,
        conditions_met: &[ConditionResult],
        sent_at: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            sent_at,
            ..Self::new(trigger_id, user_id, notification_type, conditions_met)?
        })
    }

    /// Serializes the event to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
