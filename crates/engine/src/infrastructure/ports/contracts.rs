//! Contract capability ports.
//!
//! Social triggers only ever talk to contracts through these traits. The
//! binary wires the in-memory adapters from `infrastructure::contracts`; real
//! chain clients implement the same signatures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use heroquest_domain::{AchievementId, ContentId, GuildId, WalletAddress};

use super::error::ContractError;

// =============================================================================
// Contract Types
// =============================================================================

/// A member's standing inside a guild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildMemberInfo {
    pub is_active: bool,
    pub reputation: u64,
    /// Total value the member has contributed to the guild treasury.
    pub contribution: u64,
    pub last_reward_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildInfo {
    pub name: String,
    pub member_count: u32,
    pub treasury_balance: u64,
    pub total_social_score: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub reach: u64,
    pub engagement: u64,
    pub amplifications: u32,
}

/// Receipt for a state-changing contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub tx_hash: String,
}

impl TxReceipt {
    pub fn new(tx_hash: impl Into<String>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
        }
    }
}

// =============================================================================
// Capability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuildSystemPort: Send + Sync {
    async fn get_member_info(
        &self,
        guild_id: &GuildId,
        address: &WalletAddress,
    ) -> Result<GuildMemberInfo, ContractError>;

    async fn get_guild_info(&self, guild_id: &GuildId) -> Result<GuildInfo, ContractError>;

    async fn distribute_rewards(
        &self,
        guild_id: &GuildId,
        recipient: &WalletAddress,
        amount: u64,
    ) -> Result<TxReceipt, ContractError>;

    /// Record an achievement of `achievement_type` against the guild's stats.
    async fn update_guild_stats(
        &self,
        guild_id: &GuildId,
        achievement_type: &str,
    ) -> Result<TxReceipt, ContractError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CastProtocolPort: Send + Sync {
    async fn amplify_content(
        &self,
        content_id: &ContentId,
        platform: &str,
    ) -> Result<TxReceipt, ContractError>;

    async fn get_content_stats(&self, content_id: &ContentId)
        -> Result<ContentStats, ContractError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementNftPort: Send + Sync {
    async fn unlock_achievement(
        &self,
        achievement_id: &AchievementId,
        address: &WalletAddress,
    ) -> Result<TxReceipt, ContractError>;

    async fn has_achievement(
        &self,
        address: &WalletAddress,
        achievement_id: &AchievementId,
    ) -> Result<bool, ContractError>;
}
