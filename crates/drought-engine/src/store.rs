//! Trigger store backends.
//!
//! The orchestrator reads triggers through the [`TriggerStore`] trait;
//! trigger lifecycle (create/edit/toggle/delete) belongs to the store owner,
//! not to this crate. An in-memory implementation is provided for tests and
//! small deployments; production backends wrap the system's trigger table.

use std::collections::HashMap;
use std::sync::Arc;

use drought_alerts::Trigger;
use parking_lot::RwLock;
use tracing::info;

use crate::error::Result;

/// Trait for trigger store backends.
pub trait TriggerStore: Send + Sync {
    /// Returns every trigger owned by the user, active or not.
    fn triggers_for_user(&self, user_id: i64) -> Result<Vec<Trigger>>;
}

/// In-memory trigger store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTriggerStore {
    triggers: Arc<RwLock<HashMap<i64, Trigger>>>,
}

impl MemoryTriggerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a trigger, keyed by its id.
    pub fn insert(&self, trigger: Trigger) {
        let mut triggers = self.triggers.write();
        info!(trigger_id = trigger.id, trigger_name = %trigger.name, "stored trigger");
        triggers.insert(trigger.id, trigger);
    }

    /// Removes a trigger by id. Returns true if one was removed.
    pub fn remove(&self, trigger_id: i64) -> bool {
        self.triggers.write().remove(&trigger_id).is_some()
    }

    /// Gets a trigger by id.
    #[must_use]
    pub fn get(&self, trigger_id: i64) -> Option<Trigger> {
        self.triggers.read().get(&trigger_id).cloned()
    }

    /// Number of stored triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.read().len()
    }

    /// Returns true if the store holds no triggers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.read().is_empty()
    }
}

impl TriggerStore for MemoryTriggerStore {
    fn triggers_for_user(&self, user_id: i64) -> Result<Vec<Trigger>> {
        let triggers = self.triggers.read();
        let mut owned: Vec<Trigger> = triggers
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; keep reports stable.
        owned.sort_by_key(|t| t.id);
        Ok(owned)
    }
}
