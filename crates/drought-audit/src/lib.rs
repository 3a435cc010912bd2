//! Notification rate limiting and audit log for DroughtWatch.
//!
//! `drought-audit` decides *when* a fired trigger is allowed to notify a
//! user. Decisions are derived from an append-only log of past notification
//! events, keyed by `(trigger_id, user_id)`.
//!
//! # Features
//!
//! - **Rate limiting**: a configurable minimum interval (default 6 hours)
//!   between notifications for the same trigger/user pair
//! - **Auditable log**: every approved notification is recorded as a
//!   [`NotificationEvent`] with a JSON snapshot of the conditions that fired
//! - **Explicit failure policy**: a log read failure resolves fail-open by
//!   default, so an unavailable store never suppresses a drought alert;
//!   fail-closed is available for tests and stricter deployments
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use drought_audit::{MemoryNotificationLog, NotificationGate, NotificationType};
//!
//! let log = Arc::new(MemoryNotificationLog::new());
//! let gate = NotificationGate::new(log);
//!
//! let decision = gate.should_notify(1, 2);
//! assert!(decision.allowed);
//!
//! // After the caller confirms dispatch:
//! gate.record(1, 2, NotificationType::Email, &[]).unwrap();
//! assert!(!gate.should_notify(1, 2).allowed);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod event;
pub mod gate;
pub mod log;

// Re-export main types at crate root
pub use error::{AuditError, Result};
pub use event::{NotificationEvent, NotificationType};
pub use gate::{GateConfig, GateDecision, NotificationGate, ReadFailurePolicy};
pub use log::{BoxedNotificationLog, MemoryNotificationLog, NotificationLog};
