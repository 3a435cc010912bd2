//! The notification gate: rate limiting with an auditable log.
//!
//! Per `(trigger_id, user_id)` pair the gate has two logical states:
//! **Cooling** (inside the rate-limit window since the last send) and
//! **Open** (eligible to send). Open transitions to Cooling atomically with
//! [`NotificationGate::record`]; Cooling transitions back to Open purely by
//! elapsed time, evaluated lazily on the next
//! [`NotificationGate::should_notify`] call.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use drought_alerts::ConditionResult;
use tracing::{debug, warn};

use crate::error::Result;
use crate::event::{NotificationEvent, NotificationType};
use crate::log::NotificationLog;

/// Policy applied when the notification log cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFailurePolicy {
    /// Allow the notification. A missed rate-limit check must never
    /// suppress a genuine drought alert.
    #[default]
    FailOpen,
    /// Suppress the notification until the log is readable again.
    FailClosed,
}

/// Configuration for the notification gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// Minimum elapsed time between two notifications for the same
    /// trigger/user pair.
    pub rate_limit_window: Duration,
    /// What to do when the log read fails.
    pub read_failure_policy: ReadFailurePolicy,
}

impl GateConfig {
    /// Default rate-limit window: 6 hours.
    pub const DEFAULT_WINDOW_HOURS: i64 = 6;
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            rate_limit_window: Duration::hours(Self::DEFAULT_WINDOW_HOURS),
            read_failure_policy: ReadFailurePolicy::FailOpen,
        }
    }
}

/// The outcome of a gate consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether the pair is eligible to notify now.
    pub allowed: bool,
    /// When the pair was last notified, if known.
    pub last_sent_at: Option<DateTime<Utc>>,
}

/// Decides whether a fired trigger may notify a user, and records the
/// events that make future decisions possible.
///
/// The gate holds no per-pair state of its own: every decision is derived
/// from the log collaborator, so concurrent gates over the same log agree.
#[derive(Clone)]
pub struct NotificationGate {
    config: GateConfig,
    log: Arc<dyn NotificationLog>,
}

impl NotificationGate {
    /// Creates a gate over a log with the default configuration.
    #[must_use]
    pub fn new(log: Arc<dyn NotificationLog>) -> Self {
        Self::with_config(log, GateConfig::default())
    }

    /// Creates a gate over a log with a custom configuration.
    #[must_use]
    pub fn with_config(log: Arc<dyn NotificationLog>, config: GateConfig) -> Self {
        Self { config, log }
    }

    /// Returns the gate configuration.
    #[must_use]
    pub const fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Decides whether the pair may notify now.
    ///
    /// No prior event means eligible. Otherwise the pair is eligible once
    /// the rate-limit window has elapsed since the most recent event. A log
    /// read failure resolves according to the configured
    /// [`ReadFailurePolicy`].
    #[must_use]
    pub fn should_notify(&self, trigger_id: i64, user_id: i64) -> GateDecision {
        match self.log.latest(trigger_id, user_id) {
            Ok(None) => GateDecision {
                allowed: true,
                last_sent_at: None,
            },
            Ok(Some(event)) => {
                let elapsed = Utc::now().signed_duration_since(event.sent_at);
                let allowed = elapsed >= self.config.rate_limit_window;

                if !allowed {
                    debug!(
                        trigger_id,
                        user_id,
                        last_sent_at = %event.sent_at,
                        elapsed_minutes = elapsed.num_minutes(),
                        "notification rate limited"
                    );
                }

                GateDecision {
                    allowed,
                    last_sent_at: Some(event.sent_at),
                }
            }
            Err(e) => {
                let allowed = match self.config.read_failure_policy {
                    ReadFailurePolicy::FailOpen => true,
                    ReadFailurePolicy::FailClosed => false,
                };
                warn!(
                    trigger_id,
                    user_id,
                    error = %e,
                    allowed,
                    "notification log read failed, applying failure policy"
                );
                GateDecision {
                    allowed,
                    last_sent_at: None,
                }
            }
        }
    }

    /// Records a sent notification, transitioning the pair from Open to
    /// Cooling.
    ///
    /// Best effort: callers invoke this after a confirmed dispatch, and a
    /// write failure must not undo that dispatch. The failure is logged and
    /// returned for diagnostics only.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or the log
    /// append fails.
    pub fn record(
        &self,
        trigger_id: i64,
        user_id: i64,
        notification_type: NotificationType,
        conditions_met: &[ConditionResult],
    ) -> Result<()> {
        let event = NotificationEvent::new(trigger_id, user_id, notification_type, conditions_met)?;

        if let Err(e) = self.log.append(event) {
            warn!(
                trigger_id,
                user_id,
                error = %e,
                "failed to record notification event"
            );
            return Err(e);
        }

        debug!(trigger_id, user_id, %notification_type, "notification recorded");
        Ok(())
    }
}

impl std::fmt::Debug for NotificationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuditError;
    use crate::log::MemoryNotificationLog;

    /// A log whose reads and writes always fail.
    #[derive(Debug, Default)]
    struct BrokenLog;

    impl NotificationLog for BrokenLog {
        fn latest(&self, _trigger_id: i64, _user_id: i64) -> Result<Option<NotificationEvent>> {
            Err(AuditError::ReadFailed {
                reason: "store unavailable".to_string(),
            })
        }

        fn append(&self, _event: NotificationEvent) -> Result<()> {
            Err(AuditError::WriteFailed {
                reason: "store unavailable".to_string(),
            })
        }
    }

    fn gate_with_memory_log() -> (NotificationGate, Arc<MemoryNotificationLog>) {
        let log = Arc::new(MemoryNotificationLog::new());
        let gate = NotificationGate::new(Arc::clone(&log) as Arc<dyn NotificationLog>);
        (gate, log)
    }

    fn backfill(log: &MemoryNotificationLog, trigger_id: i64, user_id: i64, age: Duration) {
        let event = NotificationEvent::sent_at(
            trigger_id,
            user_id,
            NotificationType::Email,
            &[],
            Utc::now() - age,
        )
        .unwrap();
        log.append(event).unwrap();
    }

    #[test]
    fn default_config() {
        let config = GateConfig::default();
        assert_eq!(config.rate_limit_window, Duration::hours(6));
        assert_eq!(config.read_failure_policy, ReadFailurePolicy::FailOpen);
    }

    #[test]
    fn no_prior_event_is_allowed() {
        let (gate, _log) = gate_with_memory_log();
        let decision = gate.should_notify(1, 2);
        assert!(decision.allowed);
        assert!(decision.last_sent_at.is_none());
    }

    #[test]
    fn just_outside_window_is_allowed() {
        let (gate, log) = gate_with_memory_log();
        backfill(&log, 1, 2, Duration::hours(6) + Duration::seconds(1));

        let decision = gate.should_notify(1, 2);
        assert!(decision.allowed);
        assert!(decision.last_sent_at.is_some());
    }

    #[test]
    fn inside_window_is_denied() {
        let (gate, log) = gate_with_memory_log();
        backfill(&log, 1, 2, Duration::hours(5) + Duration::minutes(59));

        let decision = gate.should_notify(1, 2);
        assert!(!decision.allowed);
        assert!(decision.last_sent_at.is_some());
    }

    #[test]
    fn custom_window_is_respected() {
        let log = Arc::new(MemoryNotificationLog::new());
        let gate = NotificationGate::with_config(
            Arc::clone(&log) as Arc<dyn NotificationLog>,
            GateConfig {
                rate_limit_window: Duration::minutes(30),
                read_failure_policy: ReadFailurePolicy::FailOpen,
            },
        );
        backfill(&log, 1, 2, Duration::minutes(31));

        assert!(gate.should_notify(1, 2).allowed);
    }

    #[test]
    fn pairs_rate_limit_independently() {
        let (gate, log) = gate_with_memory_log();
        backfill(&log, 1, 2, Duration::hours(1));

        assert!(!gate.should_notify(1, 2).allowed);
        assert!(gate.should_notify(1, 3).allowed);
        assert!(gate.should_notify(8, 2).allowed);
    }

    #[test]
    fn fail_open_allows_on_read_error() {
        let gate = NotificationGate::new(Arc::new(BrokenLog));
        let decision = gate.should_notify(1, 2);
        assert!(decision.allowed);
        assert!(decision.last_sent_at.is_none());
    }

    #[test]
    fn fail_closed_denies_on_read_error() {
        let gate = NotificationGate::with_config(
            Arc::new(BrokenLog),
            GateConfig {
                rate_limit_window: Duration::hours(6),
                read_failure_policy: ReadFailurePolicy::FailClosed,
            },
        );
        assert!(!gate.should_notify(1, 2).allowed);
    }

    #[test]
    fn record_transitions_open_to_cooling() {
        let (gate, _log) = gate_with_memory_log();
        assert!(gate.should_notify(1, 2).allowed);

        gate.record(1, 2, NotificationType::Email, &[]).unwrap();

        let decision = gate.should_notify(1, 2);
        assert!(!decision.allowed);
        assert!(decision.last_sent_at.is_some());
    }

    #[test]
    fn record_write_failure_is_surfaced_not_fatal() {
        let gate = NotificationGate::new(Arc::new(BrokenLog));
        let result = gate.record(1, 2, NotificationType::Email, &[]);
        assert!(matches!(result, Err(AuditError::WriteFailed { .. })));
    }

    #[test]
    fn record_keeps_full_history() {
        let (gate, log) = gate_with_memory_log();
        gate.record(1, 2, NotificationType::Email, &[]).unwrap();
        gate.record(1, 2, NotificationType::Sms, &[]).unwrap();

        assert_eq!(log.history(1, 2).len(), 2);
    }
}
