//! Three-phase trigger execution.
//!
//! A trigger runs `validate`, then `conditions`, then `actions`, stopping at
//! the first phase that reports failure. Errors and panics from any phase are
//! folded into a failed `TriggerResult`, so `execute` never fails.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;

use heroquest_domain::TriggerResult;

use super::context::{TriggerContext, TriggerError};

/// Message used when a phase panics without a textual payload.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    Validating,
    CheckingConditions,
    Acting,
}

impl fmt::Display for TriggerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validating => write!(f, "validate"),
            Self::CheckingConditions => write!(f, "conditions"),
            Self::Acting => write!(f, "actions"),
        }
    }
}

/// The behavior of one trigger definition.
#[async_trait]
pub trait TriggerPhases: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Preconditions checked before anything else. Passes by default.
    async fn validate(&self, _ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        Ok(TriggerResult::success())
    }

    async fn conditions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError>;

    async fn actions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError>;
}

/// An executable trigger. Cheap to clone.
#[derive(Clone)]
pub struct Trigger {
    phases: Arc<dyn TriggerPhases>,
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger").field("name", &self.name()).finish()
    }
}

pub fn create_trigger(phases: impl TriggerPhases + 'static) -> Trigger {
    Trigger {
        phases: Arc::new(phases),
    }
}

impl Trigger {
    pub fn name(&self) -> &str {
        self.phases.name()
    }

    pub fn description(&self) -> &str {
        self.phases.description()
    }

    pub async fn execute(&self, ctx: &TriggerContext<'_>) -> TriggerResult {
        let name = self.name();

        match AssertUnwindSafe(self.run(ctx)).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err((phase, err))) => {
                tracing::warn!(
                    trigger = name,
                    phase = %phase,
                    sender = %ctx.sender,
                    error = %err,
                    "Trigger phase failed unexpectedly"
                );
                TriggerResult::failure(err.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::warn!(
                    trigger = name,
                    sender = %ctx.sender,
                    error = %message,
                    "Trigger phase panicked"
                );
                TriggerResult::failure(message)
            }
        }
    }

    async fn run(
        &self,
        ctx: &TriggerContext<'_>,
    ) -> Result<TriggerResult, (TriggerPhase, TriggerError)> {
        let name = self.name();

        tracing::debug!(trigger = name, phase = %TriggerPhase::Validating, "Running trigger phase");
        let validation = self
            .phases
            .validate(ctx)
            .await
            .map_err(|e| (TriggerPhase::Validating, e))?;
        if !validation.is_success() {
            log_rejection(name, TriggerPhase::Validating, &validation);
            return Ok(validation);
        }

        tracing::debug!(trigger = name, phase = %TriggerPhase::CheckingConditions, "Running trigger phase");
        let conditions = self
            .phases
            .conditions(ctx)
            .await
            .map_err(|e| (TriggerPhase::CheckingConditions, e))?;
        if !conditions.is_success() {
            log_rejection(name, TriggerPhase::CheckingConditions, &conditions);
            return Ok(conditions);
        }

        tracing::debug!(trigger = name, phase = %TriggerPhase::Acting, "Running trigger phase");
        let result = self
            .phases
            .actions(ctx)
            .await
            .map_err(|e| (TriggerPhase::Acting, e))?;
        if result.is_success() {
            tracing::info!(trigger = name, sender = %ctx.sender, "Trigger executed");
        } else {
            log_rejection(name, TriggerPhase::Acting, &result);
        }
        Ok(result)
    }
}

fn log_rejection(trigger: &str, phase: TriggerPhase, result: &TriggerResult) {
    tracing::info!(
        trigger,
        phase = %phase,
        reason = result.message().unwrap_or_default(),
        "Trigger rejected"
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        UNKNOWN_ERROR_MESSAGE.to_string()
    }
}
