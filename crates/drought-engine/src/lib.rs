//! Trigger orchestration for DroughtWatch.
//!
//! `drought-engine` ties the evaluation and audit layers together: it loads
//! a user's triggers from a [`TriggerStore`], evaluates the active ones
//! against a measurement snapshot, attaches recommendations to fired
//! triggers, and asks the notification gate whether each firing may notify.
//!
//! Recording a sent notification stays with the caller: dispatch happens
//! outside this crate, and only a confirmed dispatch should be recorded.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use drought_alerts::{CombinationRule, Condition, Indicator, Operator, Trigger, WeatherSnapshot};
//! use drought_audit::{MemoryNotificationLog, NotificationGate};
//! use drought_engine::{MemoryTriggerStore, TriggerOrchestrator};
//!
//! let store = Arc::new(MemoryTriggerStore::new());
//! store.insert(
//!     Trigger::builder("Taranaki Drought Alert")
//!         .id(1)
//!         .user_id(2)
//!         .condition(Condition::new(Indicator::Temp, Operator::GreaterThan, 25.0))
//!         .combination_rule(CombinationRule::Any1)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let gate = NotificationGate::new(Arc::new(MemoryNotificationLog::new()));
//! let orchestrator = TriggerOrchestrator::new(store, gate);
//!
//! let snapshot = WeatherSnapshot::new().temperature(27.5);
//! let report = orchestrator.evaluate_all(2, &snapshot).unwrap();
//! assert_eq!(report.total_approved, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod orchestrator;
pub mod store;

// Re-export main types at crate root
pub use error::{EngineError, Result};
pub use orchestrator::{EvaluationReport, TriggerAlert, TriggerOrchestrator};
pub use store::{MemoryTriggerStore, TriggerStore};
