//! Portfolio snapshots and rebalancing policy
//!
//! The rebalancer blends each position's own target allocation with what the
//! community suggests for that asset, then recommends moving any position
//! whose drift from the blended target exceeds the policy threshold.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, UserId};

/// One asset held in a portfolio. Allocations are fractions of the whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub asset: String,
    pub allocation: f64,
    pub target_allocation: f64,
    pub apy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub user_id: UserId,
    pub total_value_usd: f64,
    pub positions: Vec<PortfolioPosition>,
    pub captured_at: DateTime<Utc>,
}

impl PortfolioSnapshot {
    /// Allocation-weighted APY across all positions.
    pub fn weighted_apy(&self) -> f64 {
        self.positions
            .iter()
            .map(|position| position.allocation * position.apy)
            .sum()
    }
}

/// Aggregated community view on an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityInsight {
    pub asset: String,
    /// -1.0 (bearish) to 1.0 (bullish)
    pub sentiment: f64,
    pub suggested_allocation: f64,
    pub contributors: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceAction {
    Increase,
    Decrease,
}

impl std::fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increase => write!(f, "increase"),
            Self::Decrease => write!(f, "decrease"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceRecommendation {
    pub asset: String,
    pub action: RebalanceAction,
    pub current_allocation: f64,
    pub target_allocation: f64,
    pub drift: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceReport {
    pub user_id: UserId,
    pub generated_at: DateTime<Utc>,
    pub portfolio_value_usd: f64,
    pub weighted_apy: f64,
    pub recommendations: Vec<RebalanceRecommendation>,
}

impl RebalanceReport {
    pub fn needs_rebalance(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

/// Thresholds controlling when a position is worth rebalancing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RebalancePolicy {
    drift_threshold: f64,
    community_weight: f64,
}

impl Default for RebalancePolicy {
    fn default() -> Self {
        Self {
            drift_threshold: 0.05,
            community_weight: 0.3,
        }
    }
}

impl RebalancePolicy {
    /// # Errors
    /// Both values must lie within `0.0..=1.0`.
    pub fn new(drift_threshold: f64, community_weight: f64) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&drift_threshold) {
            return Err(DomainError::validation(format!(
                "drift threshold must be between 0 and 1, got {}",
                drift_threshold
            )));
        }
        if !(0.0..=1.0).contains(&community_weight) {
            return Err(DomainError::validation(format!(
                "community weight must be between 0 and 1, got {}",
                community_weight
            )));
        }
        Ok(Self {
            drift_threshold,
            community_weight,
        })
    }

    pub fn drift_threshold(&self) -> f64 {
        self.drift_threshold
    }

    pub fn community_weight(&self) -> f64 {
        self.community_weight
    }

    /// Recommendations for every position drifting past the threshold,
    /// largest drift first.
    pub fn recommend(
        &self,
        snapshot: &PortfolioSnapshot,
        insights: &[CommunityInsight],
    ) -> Vec<RebalanceRecommendation> {
        let by_asset: HashMap<&str, &CommunityInsight> = insights
            .iter()
            .map(|insight| (insight.asset.as_str(), insight))
            .collect();

        let mut recommendations: Vec<RebalanceRecommendation> = snapshot
            .positions
            .iter()
            .filter_map(|position| {
                let insight = by_asset.get(position.asset.as_str()).copied();
                let target = match insight {
                    Some(insight) => {
                        (1.0 - self.community_weight) * position.target_allocation
                            + self.community_weight * insight.suggested_allocation
                    }
                    None => position.target_allocation,
                };
                let drift = position.allocation - target;
                if drift.abs() < self.drift_threshold {
                    return None;
                }

                let action = if drift > 0.0 {
                    RebalanceAction::Decrease
                } else {
                    RebalanceAction::Increase
                };
                let reason = match insight {
                    Some(insight) => format!(
                        "{} is {:.1}% off target; {} community members rate it {:+.2}",
                        position.asset,
                        drift.abs() * 100.0,
                        insight.contributors,
                        insight.sentiment
                    ),
                    None => format!(
                        "{} is {:.1}% off target",
                        position.asset,
                        drift.abs() * 100.0
                    ),
                };

                Some(RebalanceRecommendation {
                    asset: position.asset.clone(),
                    action,
                    current_allocation: position.allocation,
                    target_allocation: target,
                    drift,
                    reason,
                })
            })
            .collect();

        recommendations.sort_by(|a, b| b.drift.abs().total_cmp(&a.drift.abs()));
        recommendations
    }

    pub fn report(
        &self,
        snapshot: &PortfolioSnapshot,
        insights: &[CommunityInsight],
        generated_at: DateTime<Utc>,
    ) -> RebalanceReport {
        RebalanceReport {
            user_id: snapshot.user_id.clone(),
            generated_at,
            portfolio_value_usd: snapshot.total_value_usd,
            weighted_apy: snapshot.weighted_apy(),
            recommendations: self.recommend(snapshot, insights),
        }
    }
}
