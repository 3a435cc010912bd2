//! Threshold trigger evaluation for DroughtWatch.
//!
//! `drought-alerts` evaluates user-defined alert rules ("triggers") over
//! environmental indicators and derives advisory recommendations when a
//! trigger fires.
//!
//! # Features
//!
//! - **Conditions**: `(indicator, operator, threshold)` rules over a closed
//!   set of indicators (temperature, rainfall, humidity, wind speed)
//! - **Combination rules**: `any_1`, `any_2`, `any_3`, `all` decide how many
//!   conditions must be met for a trigger to fire
//! - **Recoverable diagnostics**: missing or null measurements mark the one
//!   condition unmet with an attached error and never abort the evaluation
//! - **Recommendations**: fixed advisory lookup per met condition, with a
//!   combined advisory when multiple indicators trigger at once
//!
//! # Example
//!
//! ```rust
//! use drought_alerts::{
//!     evaluate_trigger, recommendations_for, CombinationRule, Condition, Indicator, Operator,
//!     Trigger, WeatherSnapshot,
//! };
//!
//! let trigger = Trigger::builder("Taranaki Drought Alert")
//!     .user_id(2)
//!     .region("Taranaki")
//!     .condition(Condition::new(Indicator::Temp, Operator::GreaterThan, 25.0))
//!     .condition(Condition::new(Indicator::Rainfall, Operator::LessThan, 2.0))
//!     .combination_rule(CombinationRule::Any2)
//!     .build()
//!     .unwrap();
//!
//! let snapshot = WeatherSnapshot::new().temperature(27.5).rainfall(1.2);
//!
//! let evaluation = evaluate_trigger(&trigger, &snapshot);
//! assert!(evaluation.fired);
//!
//! let advisories = recommendations_for(&evaluation.conditions_met);
//! assert!(!advisories.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod eval;
pub mod recommend;
pub mod types;

// Re-export main types at crate root
pub use error::{Result, TriggerError};
pub use eval::{evaluate_condition, evaluate_trigger};
pub use recommend::recommendations_for;
pub use types::{
    CombinationRule, Condition, ConditionResult, Indicator, Operator, OperatorDirection, Trigger,
    TriggerBuilder, TriggerEvaluation, WeatherSnapshot,
};
