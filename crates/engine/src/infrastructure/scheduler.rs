//! Periodic job runner.
//!
//! Each job gets its own tokio task ticking on a fixed interval until the
//! shared cancellation token fires. The first tick happens one full period
//! after `spawn`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JobError {
    #[error("Job {job} failed: {message}")]
    Failed { job: &'static str, message: String },
}

impl JobError {
    pub fn failed(job: &'static str, message: impl ToString) -> Self {
        Self::Failed {
            job,
            message: message.to_string(),
        }
    }
}

/// Work that runs on a schedule.
#[async_trait]
pub trait ScheduledJob: Send + Sync {
    fn name(&self) -> &'static str;

    async fn tick(&self) -> Result<(), JobError>;
}

struct ScheduledEntry {
    every: Duration,
    job: Arc<dyn ScheduledJob>,
}

#[derive(Default)]
pub struct Scheduler {
    entries: Vec<ScheduledEntry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `job` to tick every `every`. Zero durations are bumped to one
    /// second since tokio intervals cannot be zero.
    pub fn every(mut self, every: Duration, job: Arc<dyn ScheduledJob>) -> Self {
        let every = if every.is_zero() {
            Duration::from_secs(1)
        } else {
            every
        };
        self.entries.push(ScheduledEntry { every, job });
        self
    }

    pub fn job_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.job.name()).collect()
    }

    /// Tick every job once, in registration order.
    pub async fn run_once(&self) -> Vec<(&'static str, Result<(), JobError>)> {
        let mut results = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let result = entry.job.tick().await;
            if let Err(e) = &result {
                tracing::warn!(job = entry.job.name(), error = %e, "Scheduled job failed");
            }
            results.push((entry.job.name(), result));
        }
        results
    }

    pub fn spawn(self, cancel_token: CancellationToken) -> Vec<JoinHandle<()>> {
        self.entries
            .into_iter()
            .map(|entry| {
                let cancel = cancel_token.clone();
                tokio::spawn(run_job(entry, cancel))
            })
            .collect()
    }
}

async fn run_job(entry: ScheduledEntry, cancel_token: CancellationToken) {
    let name = entry.job.name();
    tracing::info!(job = name, every_secs = entry.every.as_secs(), "Starting scheduled job");

    let mut ticker = interval_at(Instant::now() + entry.every, entry.every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::info!(job = name, "Scheduled job shutting down");
                break;
            }
            _ = ticker.tick() => {
                tracing::debug!(job = name, "Scheduled job tick");
                if let Err(e) = entry.job.tick().await {
                    tracing::warn!(job = name, error = %e, "Scheduled job failed");
                }
            }
        }
    }
}
