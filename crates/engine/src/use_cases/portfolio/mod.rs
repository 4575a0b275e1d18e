//! Portfolio rebalancing use cases.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;

use heroquest_domain::{RebalancePolicy, RebalanceReport, UserId};

use crate::infrastructure::ports::{ClockPort, PortfolioDataPort, PortfolioError};
use crate::infrastructure::scheduler::{JobError, ScheduledJob};

pub const PORTFOLIO_REBALANCER_JOB: &str = "portfolio-rebalancer";
pub const DEFAULT_REBALANCE_INTERVAL: Duration = Duration::from_secs(3_600);

/// Periodically compares each tracked user's portfolio with community
/// sentiment and keeps the latest recommendations.
pub struct PortfolioRebalancer {
    source: Arc<dyn PortfolioDataPort>,
    policy: RebalancePolicy,
    clock: Arc<dyn ClockPort>,
    users: Vec<UserId>,
    reports: DashMap<UserId, RebalanceReport>,
}

impl PortfolioRebalancer {
    pub fn new(
        source: Arc<dyn PortfolioDataPort>,
        policy: RebalancePolicy,
        clock: Arc<dyn ClockPort>,
        users: Vec<UserId>,
    ) -> Self {
        Self {
            source,
            policy,
            clock,
            users,
            reports: DashMap::new(),
        }
    }

    pub async fn analyze_user(&self, user_id: &UserId) -> Result<RebalanceReport, PortfolioError> {
        let snapshot = self.source.fetch_portfolio(user_id).await?;
        let insights = self.source.fetch_community_insights().await?;

        let report = self.policy.report(&snapshot, &insights, self.clock.now());
        if report.needs_rebalance() {
            tracing::info!(
                user_id = %user_id,
                recommendations = report.recommendations.len(),
                weighted_apy = report.weighted_apy,
                "Rebalance recommended"
            );
        } else {
            tracing::debug!(user_id = %user_id, "Portfolio within drift threshold");
        }

        self.reports.insert(user_id.clone(), report.clone());
        Ok(report)
    }

    pub fn latest_report(&self, user_id: &UserId) -> Option<RebalanceReport> {
        self.reports.get(user_id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl ScheduledJob for PortfolioRebalancer {
    fn name(&self) -> &'static str {
        PORTFOLIO_REBALANCER_JOB
    }

    async fn tick(&self) -> Result<(), JobError> {
        let mut failures = 0;
        for user_id in &self.users {
            if let Err(e) = self.analyze_user(user_id).await {
                failures += 1;
                tracing::warn!(user_id = %user_id, error = %e, "Portfolio analysis failed");
            }
        }

        if failures > 0 && failures == self.users.len() {
            return Err(JobError::failed(
                PORTFOLIO_REBALANCER_JOB,
                format!("analysis failed for all {failures} users"),
            ));
        }
        Ok(())
    }
}
