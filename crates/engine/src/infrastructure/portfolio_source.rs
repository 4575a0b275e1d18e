//! Simulated portfolio and community data.
//!
//! Generates plausible positions for a fixed asset list so the rebalancer has
//! something to chew on until a real indexer is wired in.

use std::sync::Arc;

use async_trait::async_trait;

use heroquest_domain::{CommunityInsight, PortfolioPosition, PortfolioSnapshot, UserId};

use crate::infrastructure::ports::{ClockPort, PortfolioDataPort, PortfolioError, RandomPort};

pub const SIMULATED_ASSETS: [&str; 4] = ["AVAX", "USDC", "WETH", "JOE"];

const MIN_PORTFOLIO_USD: i32 = 1_000;
const MAX_PORTFOLIO_USD: i32 = 50_000;
const MAX_APY: f64 = 0.25;
const MAX_CONTRIBUTORS: i32 = 500;

pub struct SimulatedPortfolioSource {
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl SimulatedPortfolioSource {
    pub fn new(random: Arc<dyn RandomPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { random, clock }
    }

    /// Random weights over the asset list, normalized to sum to 1.
    fn weights(&self) -> Vec<f64> {
        // Offset keeps every weight strictly positive.
        let raw: Vec<f64> = SIMULATED_ASSETS
            .iter()
            .map(|_| 0.1 + self.random.gen_unit())
            .collect();
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|w| w / total).collect()
    }
}

#[async_trait]
impl PortfolioDataPort for SimulatedPortfolioSource {
    async fn fetch_portfolio(&self, user_id: &UserId) -> Result<PortfolioSnapshot, PortfolioError> {
        let current = self.weights();
        let target = self.weights();

        let positions = SIMULATED_ASSETS
            .iter()
            .zip(current.into_iter().zip(target))
            .map(|(asset, (allocation, target_allocation))| PortfolioPosition {
                asset: (*asset).to_string(),
                allocation,
                target_allocation,
                apy: self.random.gen_unit() * MAX_APY,
            })
            .collect();

        Ok(PortfolioSnapshot {
            user_id: user_id.clone(),
            total_value_usd: f64::from(
                self.random.gen_range(MIN_PORTFOLIO_USD, MAX_PORTFOLIO_USD),
            ),
            positions,
            captured_at: self.clock.now(),
        })
    }

    async fn fetch_community_insights(&self) -> Result<Vec<CommunityInsight>, PortfolioError> {
        let suggested = self.weights();

        Ok(SIMULATED_ASSETS
            .iter()
            .zip(suggested)
            .map(|(asset, suggested_allocation)| CommunityInsight {
                asset: (*asset).to_string(),
                sentiment: self.random.gen_unit() * 2.0 - 1.0,
                suggested_allocation,
                contributors: self.random.gen_range(1, MAX_CONTRIBUTORS).unsigned_abs(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::infrastructure::clock::{FixedClock, FixedRandom};

    fn source() -> SimulatedPortfolioSource {
        SimulatedPortfolioSource::new(
            Arc::new(FixedRandom::new(20_000, 0.4)),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())),
        )
    }

    #[tokio::test]
    async fn snapshot_covers_every_asset_with_normalized_allocations() {
        let user = UserId::new("default-user").unwrap();

        let snapshot = source().fetch_portfolio(&user).await.unwrap();

        let assets: Vec<&str> = snapshot.positions.iter().map(|p| p.asset.as_str()).collect();
        assert_eq!(assets, SIMULATED_ASSETS.to_vec());
        let total: f64 = snapshot.positions.iter().map(|p| p.allocation).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(snapshot.total_value_usd, 20_000.0);
        assert_eq!(snapshot.user_id, user);
    }

    #[tokio::test]
    async fn insights_stay_in_range() {
        let insights = source().fetch_community_insights().await.unwrap();

        assert_eq!(insights.len(), SIMULATED_ASSETS.len());
        for insight in insights {
            assert!((-1.0..=1.0).contains(&insight.sentiment));
            assert!((0.0..=1.0).contains(&insight.suggested_allocation));
            assert!(insight.contributors >= 1);
        }
    }
}
