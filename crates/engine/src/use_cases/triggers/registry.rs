//! Name-based trigger lookup.

use std::collections::BTreeMap;

use heroquest_domain::TriggerResult;

use super::context::TriggerContext;
use super::engine::Trigger;

#[derive(Debug, Clone, Default)]
pub struct TriggerRegistry {
    triggers: BTreeMap<String, Trigger>,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger under its own name, returning any trigger it replaced.
    pub fn register(&mut self, trigger: Trigger) -> Option<Trigger> {
        let replaced = self.triggers.insert(trigger.name().to_string(), trigger);
        if let Some(old) = &replaced {
            tracing::warn!(trigger = old.name(), "Replaced registered trigger");
        }
        replaced
    }

    pub fn with(mut self, trigger: Trigger) -> Self {
        self.register(trigger);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Trigger> {
        self.triggers.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.triggers.keys().map(String::as_str).collect()
    }

    pub async fn execute(&self, name: &str, ctx: &TriggerContext<'_>) -> TriggerResult {
        match self.get(name) {
            Some(trigger) => trigger.execute(ctx).await,
            None => {
                tracing::info!(trigger = name, "Unknown trigger requested");
                TriggerResult::failure(format!("Trigger no encontrado: {name}"))
            }
        }
    }
}
