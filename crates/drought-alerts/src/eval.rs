//! Condition and combination evaluation.
//!
//! Both entry points are pure functions: evaluating the same trigger against
//! the same snapshot twice yields identical results (modulo the
//! `evaluated_at` stamp). Recoverable problems are recorded on the result
//! rather than returned as errors, so one bad condition never blocks its
//! siblings.

use chrono::Utc;
use tracing::debug;

use crate::types::{Condition, ConditionResult, Trigger, TriggerEvaluation, WeatherSnapshot};

/// Evaluates one condition against one snapshot.
///
/// A missing or null/non-finite measurement makes the condition unmet and
/// attaches a diagnostic; it is never a fatal error.
#[must_use]
pub fn evaluate_condition(condition: &Condition, snapshot: &WeatherSnapshot) -> ConditionResult {
    let key = condition.indicator.measurement_key();

    let Some(reading) = snapshot.value_for(condition.indicator) else {
        return ConditionResult::failed(*condition, format!("missing indicator: {key}"));
    };

    match reading {
        Some(value) if value.is_finite() => {
            let met = condition.operator.evaluate(value, condition.threshold);
            ConditionResult::evaluated(*condition, value, met)
        }
        _ => ConditionResult::failed(*condition, format!("null or invalid value for: {key}")),
    }
}

/// Evaluates a whole trigger against one snapshot.
///
/// Every condition is evaluated independently; the combination rule then
/// decides the fired verdict from the met count. Recommendations are left
/// empty here and attached by the orchestrator once a trigger has fired.
#[must_use]
pub fn evaluate_trigger(trigger: &Trigger, snapshot: &WeatherSnapshot) -> TriggerEvaluation {
    let all_condition_results: Vec<ConditionResult> = trigger
        .conditions
        .iter()
        .map(|condition| evaluate_condition(condition, snapshot))
        .collect();

    let conditions_met: Vec<ConditionResult> = all_condition_results
        .iter()
        .filter(|r| r.met)
        .cloned()
        .collect();

    let mut errors: Vec<String> = all_condition_results
        .iter()
        .filter_map(|r| r.error.clone())
        .collect();

    let total = trigger.conditions.len();
    let fired = if total == 0 {
        errors.push("trigger has no conditions".to_string());
        false
    } else {
        trigger
            .combination_rule
            .is_satisfied(conditions_met.len(), total)
    };

    debug!(
        trigger_id = trigger.id,
        trigger_name = %trigger.name,
        rule = %trigger.combination_rule,
        met = conditions_met.len(),
        total,
        fired,
        "trigger evaluated"
    );

    TriggerEvaluation {
        trigger: trigger.clone(),
        fired,
        conditions_met,
        all_condition_results,
        recommendations: Vec::new(),
        errors,
        evaluated_at: Utc::now(),
    }
}
