//! The trigger orchestrator: evaluation, recommendations, and gating for a
//! whole user.
//!
//! For one user and one snapshot the orchestrator loads the user's triggers,
//! evaluates each active one, attaches recommendations to fired triggers,
//! and consults the notification gate. It never records notification events
//! itself: the caller records through [`TriggerOrchestrator::gate`] only
//! after a confirmed dispatch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use drought_alerts::{evaluate_trigger, recommendations_for, TriggerEvaluation, WeatherSnapshot};
use drought_audit::NotificationGate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::store::TriggerStore;

/// One trigger's evaluation outcome plus its notification verdict.
///
/// "Fired but rate-limited" and "fired and approved" are distinguishable
/// here so callers can build dashboards without losing diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerAlert {
    /// The full evaluation, recommendations included when fired.
    pub evaluation: TriggerEvaluation,
    /// Whether the gate approved notifying for this firing.
    pub approved_for_notification: bool,
    /// Whether the gate suppressed a firing because the pair is inside its
    /// rate-limit window.
    pub rate_limited: bool,
    /// When this trigger last notified this user, if known.
    pub last_notified_at: Option<DateTime<Utc>>,
}

/// The result of evaluating every active trigger a user owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// The evaluated user.
    pub user_id: i64,
    /// When the batch ran.
    pub evaluated_at: DateTime<Utc>,
    /// Number of alerts approved for notification.
    pub total_approved: usize,
    /// One entry per active trigger, fired or not.
    pub alerts: Vec<TriggerAlert>,
}

impl EvaluationReport {
    /// The approved subset of alerts.
    #[must_use]
    pub fn approved(&self) -> Vec<&TriggerAlert> {
        self.alerts
            .iter()
            .filter(|a| a.approved_for_notification)
            .collect()
    }

    /// The fired subset of alerts, approved or not.
    #[must_use]
    pub fn fired(&self) -> Vec<&TriggerAlert> {
        self.alerts
            .iter()
            .filter(|a| a.evaluation.fired)
            .collect()
    }
}

/// Evaluates all of a user's triggers against a measurement snapshot.
#[derive(Clone)]
pub struct TriggerOrchestrator {
    store: Arc<dyn TriggerStore>,
    gate: NotificationGate,
}

impl TriggerOrchestrator {
    /// Creates an orchestrator over a trigger store and a notification gate.
    #[must_use]
    pub fn new(store: Arc<dyn TriggerStore>, gate: NotificationGate) -> Self {
        Self { store, gate }
    }

    /// Returns the notification gate, for recording after confirmed
    /// dispatch.
    #[must_use]
    pub const fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    /// Evaluates every active trigger the user owns against the snapshot.
    ///
    /// Returns the full list of evaluations, fired or not; approval is a
    /// flag on each entry. Triggers are independent: one trigger's bad data
    /// never affects its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StoreUnavailable`] if the trigger store read
    /// fails; the batch cannot proceed without triggers.
    pub fn evaluate_all(&self, user_id: i64, snapshot: &WeatherSnapshot) -> Result<EvaluationReport> {
        let triggers = self.store.triggers_for_user(user_id).map_err(|e| {
            warn!(user_id, error = %e, "failed to load triggers");
            EngineError::StoreUnavailable {
                reason: e.to_string(),
            }
        })?;

        let mut alerts = Vec::new();
        let mut total_approved = 0;

        for trigger in triggers.into_iter().filter(|t| t.is_active) {
            let mut evaluation = evaluate_trigger(&trigger, snapshot);

            // Not fired: no recommendations, no gate consultation, no entry
            // in the audit log.
            if !evaluation.fired {
                alerts.push(TriggerAlert {
                    evaluation,
                    approved_for_notification: false,
                    rate_limited: false,
                    last_notified_at: None,
                });
                continue;
            }

            evaluation.recommendations = recommendations_for(&evaluation.conditions_met);

            let decision = self.gate.should_notify(trigger.id, user_id);
            if decision.allowed {
                total_approved += 1;
                info!(
                    user_id,
                    trigger_id = trigger.id,
                    trigger_name = %trigger.name,
                    met = evaluation.met_count(),
                    "trigger fired, approved for notification"
                );
            } else {
                debug!(
                    user_id,
                    trigger_id = trigger.id,
                    trigger_name = %trigger.name,
                    "trigger fired but rate limited"
                );
            }

            alerts.push(TriggerAlert {
                evaluation,
                approved_for_notification: decision.allowed,
                rate_limited: !decision.allowed,
                last_notified_at: decision.last_sent_at,
            });
        }

        debug!(
            user_id,
            evaluated = alerts.len(),
            total_approved,
            "evaluation batch complete"
        );

        Ok(EvaluationReport {
            user_id,
            evaluated_at: Utc::now(),
            total_approved,
            alerts,
        })
    }
}

impl std::fmt::Debug for TriggerOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerOrchestrator")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
