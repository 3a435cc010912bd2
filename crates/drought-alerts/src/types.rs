//! Core types for the trigger evaluation engine.
//!
//! This module provides the fundamental types used throughout the
//! drought-alerts crate:
//! - [`Indicator`]: the closed set of environmental indicators
//! - [`Operator`]: threshold comparison operators
//! - [`CombinationRule`]: how many conditions must be met for a trigger to fire
//! - [`Condition`]: one `(indicator, operator, threshold)` rule
//! - [`Trigger`]: a user-owned alert rule over a set of conditions
//! - [`WeatherSnapshot`]: a point-in-time view of measured values
//! - [`ConditionResult`] / [`TriggerEvaluation`]: evaluation outputs

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TriggerError};

/// An environmental indicator a condition can be defined over.
///
/// This is a closed set: unknown indicator keys are rejected at the storage
/// boundary by [`Indicator::from_key`], never handled during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Air temperature, in degrees Celsius.
    Temp,
    /// Rainfall, in millimetres.
    Rainfall,
    /// Relative humidity, in percent.
    Humidity,
    /// Wind speed, in km/h.
    WindSpeed,
}

impl Indicator {
    /// Returns the key used in stored conditions (`temp`, `rainfall`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Temp => "temp",
            Self::Rainfall => "rainfall",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind_speed",
        }
    }

    /// Returns the key this indicator is looked up under in a
    /// [`WeatherSnapshot`]. Condition keys and measurement keys differ for
    /// temperature (`temp` vs `temperature`).
    #[must_use]
    pub const fn measurement_key(&self) -> &'static str {
        match self {
            Self::Temp => "temperature",
            Self::Rainfall => "rainfall",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind_speed",
        }
    }

    /// Decodes a stored condition key.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::InvalidIndicator`] for anything outside the
    /// closed set.
    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "temp" => Ok(Self::Temp),
            "rainfall" => Ok(Self::Rainfall),
            "humidity" => Ok(Self::Humidity),
            "wind_speed" => Ok(Self::WindSpeed),
            other => Err(TriggerError::InvalidIndicator {
                key: other.to_string(),
            }),
        }
    }

    /// All indicators, in a stable order.
    pub const ALL: [Self; 4] = [Self::Temp, Self::Rainfall, Self::Humidity, Self::WindSpeed];
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Threshold comparison operators.
///
/// A closed enum with an exhaustive match, so an unrecognized operator is a
/// decode-time error ([`Operator::from_symbol`]) rather than a silent
/// runtime lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Greater than (>).
    #[serde(rename = ">")]
    GreaterThan,
    /// Less than (<).
    #[serde(rename = "<")]
    LessThan,
    /// Greater than or equal (>=).
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    /// Less than or equal (<=).
    #[serde(rename = "<=")]
    LessThanOrEqual,
    /// Equal (==). Exact float equality, no epsilon tolerance; a known
    /// limitation inherited from the measurement source contract.
    #[serde(rename = "==")]
    Equal,
}

impl Operator {
    /// Evaluates the comparison between a measured value and a threshold.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn evaluate(&self, actual: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => actual > threshold,
            Self::LessThan => actual < threshold,
            Self::GreaterThanOrEqual => actual >= threshold,
            Self::LessThanOrEqual => actual <= threshold,
            Self::Equal => actual == threshold,
        }
    }

    /// Returns the operator as a string symbol.
    #[must_use]
    pub const fn as_symbol(&self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
            Self::Equal => "==",
        }
    }

    /// Decodes a stored operator symbol.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::InvalidOperator`] for any symbol outside the
    /// five recognized operators.
    pub fn from_symbol(symbol: &str) -> Result<Self> {
        match symbol {
            ">" => Ok(Self::GreaterThan),
            "<" => Ok(Self::LessThan),
            ">=" => Ok(Self::GreaterThanOrEqual),
            "<=" => Ok(Self::LessThanOrEqual),
            "==" => Ok(Self::Equal),
            other => Err(TriggerError::InvalidOperator {
                symbol: other.to_string(),
            }),
        }
    }

    /// Returns the direction this operator alerts on, used to pick
    /// advisories.
    #[must_use]
    pub const fn direction(&self) -> OperatorDirection {
        match self {
            Self::GreaterThan | Self::GreaterThanOrEqual => OperatorDirection::High,
            Self::LessThan | Self::LessThanOrEqual => OperatorDirection::Low,
            Self::Equal => OperatorDirection::Exact,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_symbol())
    }
}

/// The direction a condition alerts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorDirection {
    /// Alerting on values above a threshold.
    High,
    /// Alerting on values below a threshold.
    Low,
    /// Alerting on an exact value.
    Exact,
}

/// Policy for how many of a trigger's conditions must be met to fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombinationRule {
    /// At least one condition met.
    #[default]
    #[serde(rename = "any_1")]
    Any1,
    /// At least two conditions met.
    #[serde(rename = "any_2")]
    Any2,
    /// At least three conditions met.
    #[serde(rename = "any_3")]
    Any3,
    /// Every condition met.
    #[serde(rename = "all")]
    All,
}

impl CombinationRule {
    /// Returns the rule as its stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any1 => "any_1",
            Self::Any2 => "any_2",
            Self::Any3 => "any_3",
            Self::All => "all",
        }
    }

    /// Number of met conditions required to fire, given the total condition
    /// count.
    #[must_use]
    pub const fn required_count(&self, total_conditions: usize) -> usize {
        match self {
            Self::Any1 => 1,
            Self::Any2 => 2,
            Self::Any3 => 3,
            Self::All => total_conditions,
        }
    }

    /// Whether the rule is satisfied by `met_count` of `total_conditions`.
    ///
    /// A trigger with zero conditions can never fire; the caller reports the
    /// data-integrity error.
    #[must_use]
    pub const fn is_satisfied(&self, met_count: usize, total_conditions: usize) -> bool {
        if total_conditions == 0 {
            return false;
        }
        met_count >= self.required_count(total_conditions)
    }
}

impl fmt::Display for CombinationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One threshold condition within a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The indicator to evaluate.
    pub indicator: Indicator,
    /// The comparison operator.
    pub operator: Operator,
    /// The threshold value to compare against.
    pub threshold: f64,
}

impl Condition {
    /// Creates a new condition.
    #[must_use]
    pub const fn new(indicator: Indicator, operator: Operator, threshold: f64) -> Self {
        Self {
            indicator,
            operator,
            threshold,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.indicator, self.operator, self.threshold)
    }
}

/// A user-owned alert rule: a set of conditions plus a combination rule.
///
/// Triggers are created and mutated by the external trigger store; the
/// engine only ever reads a per-evaluation snapshot of one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// Unique identifier for the trigger.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// Human-readable name.
    pub name: String,
    /// Region this trigger watches.
    pub region: String,
    /// Ordered conditions; order is irrelevant to semantics but stable for
    /// reporting.
    pub conditions: Vec<Condition>,
    /// How the conditions combine into a fired/not-fired verdict.
    pub combination_rule: CombinationRule,
    /// Inactive triggers are never evaluated.
    pub is_active: bool,
}

impl Trigger {
    /// Maximum allowed length for trigger names.
    pub const MAX_NAME_LENGTH: usize = 256;

    /// Creates a new trigger builder.
    pub fn builder(name: impl Into<String>) -> TriggerBuilder {
        TriggerBuilder::new(name)
    }
}

/// Builder for creating [`Trigger`] instances.
#[derive(Debug)]
pub struct TriggerBuilder {
    id: i64,
    user_id: i64,
    name: String,
    region: String,
    conditions: Vec<Condition>,
    combination_rule: CombinationRule,
    is_active: bool,
}

impl TriggerBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            user_id: 0,
            name: name.into(),
            region: String::new(),
            conditions: Vec::new(),
            combination_rule: CombinationRule::Any1,
            is_active: true,
        }
    }

    /// Sets the trigger id (assigned by the trigger store).
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Sets the owning user.
    #[must_use]
    pub const fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Adds one condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds multiple conditions.
    #[must_use]
    pub fn conditions(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Sets the combination rule.
    #[must_use]
    pub const fn combination_rule(mut self, rule: CombinationRule) -> Self {
        self.combination_rule = rule;
        self
    }

    /// Sets whether the trigger is active.
    #[must_use]
    pub const fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds the [`Trigger`].
    ///
    /// A trigger with zero conditions is allowed to build: it is a
    /// data-integrity problem surfaced at evaluation time, not here.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::InvalidTrigger` if the name is empty or
    /// exceeds the maximum length.
    pub fn build(self) -> Result<Trigger> {
        if self.name.is_empty() {
            return Err(TriggerError::InvalidTrigger {
                reason: "trigger name cannot be empty".to_string(),
            });
        }

        if self.name.len() > Trigger::MAX_NAME_LENGTH {
            return Err(TriggerError::InvalidTrigger {
                reason: format!(
                    "trigger name exceeds maximum length of {} characters",
                    Trigger::MAX_NAME_LENGTH
                ),
            });
        }

        Ok(Trigger {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            region: self.region,
            conditions: self.conditions,
            combination_rule: self.combination_rule,
            is_active: self.is_active,
        })
    }
}

/// A point-in-time mapping of measurement key to measured value.
///
/// Values may be absent (the source never reported the indicator) or null
/// (the source reported it without a reading); the two cases produce
/// different diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherSnapshot {
    values: HashMap<String, Option<f64>>,
}

impl WeatherSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a raw measurement by key. `None` records an explicit null.
    pub fn set(&mut self, key: impl Into<String>, value: Option<f64>) {
        self.values.insert(key.into(), value);
    }

    /// Sets the temperature reading.
    #[must_use]
    pub fn temperature(mut self, value: f64) -> Self {
        self.set(Indicator::Temp.measurement_key(), Some(value));
        self
    }

    /// Sets the rainfall reading.
    #[must_use]
    pub fn rainfall(mut self, value: f64) -> Self {
        self.set(Indicator::Rainfall.measurement_key(), Some(value));
        self
    }

    /// Sets the humidity reading.
    #[must_use]
    pub fn humidity(mut self, value: f64) -> Self {
        self.set(Indicator::Humidity.measurement_key(), Some(value));
        self
    }

    /// Sets the wind speed reading.
    #[must_use]
    pub fn wind_speed(mut self, value: f64) -> Self {
        self.set(Indicator::WindSpeed.measurement_key(), Some(value));
        self
    }

    /// Records an explicit null for an indicator.
    #[must_use]
    pub fn null(mut self, indicator: Indicator) -> Self {
        self.set(indicator.measurement_key(), None);
        self
    }

    /// Looks up the value for an indicator.
    ///
    /// Returns `None` when the measurement is absent, `Some(None)` when it
    /// is present but null, and `Some(Some(v))` when a reading exists.
    #[must_use]
    pub fn value_for(&self, indicator: Indicator) -> Option<Option<f64>> {
        self.values.get(indicator.measurement_key()).copied()
    }

    /// Returns true if the snapshot carries no measurements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for WeatherSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k, Some(v))).collect(),
        }
    }
}

/// The outcome of evaluating one condition against one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    /// The condition that was evaluated.
    pub condition: Condition,
    /// The measured value, if one was available.
    pub actual_value: Option<f64>,
    /// Whether the condition was met.
    pub met: bool,
    /// Diagnostic for a recoverable per-condition problem.
    pub error: Option<String>,
}

impl ConditionResult {
    /// Result for a condition that was evaluated against a real value.
    #[must_use]
    pub const fn evaluated(condition: Condition, actual_value: f64, met: bool) -> Self {
        Self {
            condition,
            actual_value: Some(actual_value),
            met,
            error: None,
        }
    }

    /// Result for a condition that could not be evaluated. Never met.
    #[must_use]
    pub fn failed(condition: Condition, error: impl Into<String>) -> Self {
        Self {
            condition,
            actual_value: None,
            met: false,
            error: Some(error.into()),
        }
    }
}

/// The outcome of evaluating a whole trigger against one snapshot.
///
/// Ephemeral: returned to the caller, never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvaluation {
    /// The trigger that was evaluated.
    pub trigger: Trigger,
    /// Whether the combination rule was satisfied.
    pub fired: bool,
    /// The met subset of `all_condition_results`, in original order.
    pub conditions_met: Vec<ConditionResult>,
    /// Every per-condition result, in condition order.
    pub all_condition_results: Vec<ConditionResult>,
    /// Advisory recommendations; populated by the recommendation generator
    /// once a trigger has fired.
    pub recommendations: Vec<String>,
    /// Every per-condition diagnostic plus any trigger-level
    /// data-integrity error, in condition order.
    pub errors: Vec<String>,
    /// When the evaluation ran.
    pub evaluated_at: DateTime<Utc>,
}

impl TriggerEvaluation {
    /// Number of conditions that were met.
    #[must_use]
    pub fn met_count(&self) -> usize {
        self.conditions_met.len()
    }
}
