//! In-memory contract adapters.
//!
//! These stand in for the on-chain guild system, cast protocol and
//! achievement NFT. State lives in `DashMap`s so adapters can be shared
//! behind `Arc` between triggers and tests without extra locking.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use heroquest_domain::{AchievementId, ContentId, GuildId, WalletAddress};

use crate::infrastructure::ports::{
    AchievementNftPort, CastProtocolPort, ClockPort, ContentStats, ContractError, GuildInfo,
    GuildMemberInfo, GuildSystemPort, TxReceipt,
};

/// Monotonic fake transaction hashes.
#[derive(Debug, Default)]
struct TxSequence(AtomicU64);

impl TxSequence {
    fn next(&self) -> TxReceipt {
        let n = self.0.fetch_add(1, Ordering::Relaxed) + 1;
        TxReceipt::new(format!("0x{n:064x}"))
    }
}

// =============================================================================
// Guild System
// =============================================================================

pub struct InMemoryGuildSystem {
    guilds: DashMap<GuildId, GuildInfo>,
    members: DashMap<(GuildId, WalletAddress), GuildMemberInfo>,
    clock: Arc<dyn ClockPort>,
    txs: TxSequence,
}

impl InMemoryGuildSystem {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            guilds: DashMap::new(),
            members: DashMap::new(),
            clock,
            txs: TxSequence::default(),
        }
    }

    pub fn with_guild(self, guild_id: GuildId, info: GuildInfo) -> Self {
        self.guilds.insert(guild_id, info);
        self
    }

    pub fn with_member(
        self,
        guild_id: GuildId,
        address: WalletAddress,
        info: GuildMemberInfo,
    ) -> Self {
        self.members.insert((guild_id, address), info);
        self
    }

    pub fn guild(&self, guild_id: &GuildId) -> Option<GuildInfo> {
        self.guilds.get(guild_id).map(|r| r.value().clone())
    }

    pub fn member(&self, guild_id: &GuildId, address: &WalletAddress) -> Option<GuildMemberInfo> {
        self.members
            .get(&(guild_id.clone(), address.clone()))
            .map(|r| r.value().clone())
    }
}

#[async_trait]
impl GuildSystemPort for InMemoryGuildSystem {
    async fn get_member_info(
        &self,
        guild_id: &GuildId,
        address: &WalletAddress,
    ) -> Result<GuildMemberInfo, ContractError> {
        // Unknown members read as inactive, like an empty mapping slot.
        Ok(self.member(guild_id, address).unwrap_or(GuildMemberInfo {
            is_active: false,
            reputation: 0,
            contribution: 0,
            last_reward_at: None,
        }))
    }

    async fn get_guild_info(&self, guild_id: &GuildId) -> Result<GuildInfo, ContractError> {
        self.guild(guild_id)
            .ok_or_else(|| ContractError::not_found("Gremio", guild_id))
    }

    async fn distribute_rewards(
        &self,
        guild_id: &GuildId,
        recipient: &WalletAddress,
        amount: u64,
    ) -> Result<TxReceipt, ContractError> {
        let mut guild = self
            .guilds
            .get_mut(guild_id)
            .ok_or_else(|| ContractError::not_found("Gremio", guild_id))?;
        if guild.treasury_balance < amount {
            return Err(ContractError::reverted(
                "distributeRewards",
                "tesoro insuficiente",
            ));
        }
        guild.treasury_balance -= amount;
        drop(guild);

        if let Some(mut member) = self
            .members
            .get_mut(&(guild_id.clone(), recipient.clone()))
        {
            member.last_reward_at = Some(self.clock.now());
        }

        tracing::debug!(guild_id = %guild_id, recipient = %recipient, amount, "Rewards distributed");
        Ok(self.txs.next())
    }

    async fn update_guild_stats(
        &self,
        guild_id: &GuildId,
        achievement_type: &str,
    ) -> Result<TxReceipt, ContractError> {
        let mut guild = self
            .guilds
            .get_mut(guild_id)
            .ok_or_else(|| ContractError::not_found("Gremio", guild_id))?;
        guild.total_social_score = guild.total_social_score.saturating_add(1);
        drop(guild);

        tracing::debug!(guild_id = %guild_id, achievement_type, "Guild stats updated");
        Ok(self.txs.next())
    }
}

// =============================================================================
// Cast Protocol
// =============================================================================

#[derive(Default)]
pub struct InMemoryCastProtocol {
    content: DashMap<ContentId, ContentStats>,
    txs: TxSequence,
}

impl InMemoryCastProtocol {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(self, content_id: ContentId, stats: ContentStats) -> Self {
        self.content.insert(content_id, stats);
        self
    }

    pub fn stats(&self, content_id: &ContentId) -> Option<ContentStats> {
        self.content.get(content_id).map(|r| r.value().clone())
    }
}

#[async_trait]
impl CastProtocolPort for InMemoryCastProtocol {
    async fn amplify_content(
        &self,
        content_id: &ContentId,
        platform: &str,
    ) -> Result<TxReceipt, ContractError> {
        let mut stats = self
            .content
            .entry(content_id.clone())
            .or_insert_with(|| ContentStats {
                reach: 0,
                engagement: 0,
                amplifications: 0,
            });
        stats.amplifications = stats.amplifications.saturating_add(1);
        drop(stats);

        tracing::debug!(content_id = %content_id, platform, "Content amplified");
        Ok(self.txs.next())
    }

    async fn get_content_stats(
        &self,
        content_id: &ContentId,
    ) -> Result<ContentStats, ContractError> {
        self.stats(content_id)
            .ok_or_else(|| ContractError::not_found("Contenido", content_id))
    }
}

// =============================================================================
// Achievement NFT
// =============================================================================

#[derive(Default)]
pub struct InMemoryAchievementNft {
    owned: DashMap<WalletAddress, HashSet<AchievementId>>,
    txs: TxSequence,
}

impl InMemoryAchievementNft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_achievement(self, address: WalletAddress, achievement_id: AchievementId) -> Self {
        self.owned.entry(address).or_default().insert(achievement_id);
        self
    }

    pub fn count_for(&self, address: &WalletAddress) -> usize {
        self.owned.get(address).map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AchievementNftPort for InMemoryAchievementNft {
    async fn unlock_achievement(
        &self,
        achievement_id: &AchievementId,
        address: &WalletAddress,
    ) -> Result<TxReceipt, ContractError> {
        let inserted = self
            .owned
            .entry(address.clone())
            .or_default()
            .insert(achievement_id.clone());
        if !inserted {
            return Err(ContractError::reverted(
                "unlockAchievement",
                "logro ya emitido",
            ));
        }

        tracing::debug!(achievement_id = %achievement_id, address = %address, "Achievement minted");
        Ok(self.txs.next())
    }

    async fn has_achievement(
        &self,
        address: &WalletAddress,
        achievement_id: &AchievementId,
    ) -> Result<bool, ContractError> {
        Ok(self
            .owned
            .get(address)
            .is_some_and(|owned| owned.contains(achievement_id)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::infrastructure::clock::FixedClock;

    fn guild_id() -> GuildId {
        GuildId::new("guild-1").unwrap()
    }

    fn address() -> WalletAddress {
        WalletAddress::new("0xabc").unwrap()
    }

    fn guild_system() -> InMemoryGuildSystem {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        InMemoryGuildSystem::new(clock)
            .with_guild(
                guild_id(),
                GuildInfo {
                    name: "Avalanche Heroes".into(),
                    member_count: 120,
                    treasury_balance: 1_000,
                    total_social_score: 0,
                },
            )
            .with_member(
                guild_id(),
                address(),
                GuildMemberInfo {
                    is_active: true,
                    reputation: 10,
                    contribution: 500,
                    last_reward_at: None,
                },
            )
    }

    #[tokio::test]
    async fn unknown_member_reads_as_inactive() {
        let guilds = guild_system();
        let stranger = WalletAddress::new("0xdef").unwrap();

        let info = guilds.get_member_info(&guild_id(), &stranger).await.unwrap();

        assert!(!info.is_active);
        assert_eq!(info.contribution, 0);
    }

    #[tokio::test]
    async fn distribute_debits_treasury_and_stamps_member() {
        let guilds = guild_system();

        let receipt = guilds
            .distribute_rewards(&guild_id(), &address(), 400)
            .await
            .unwrap();

        assert!(receipt.tx_hash.starts_with("0x"));
        assert_eq!(guilds.guild(&guild_id()).unwrap().treasury_balance, 600);
        assert_eq!(
            guilds.member(&guild_id(), &address()).unwrap().last_reward_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn distribute_beyond_treasury_reverts() {
        let guilds = guild_system();

        let err = guilds
            .distribute_rewards(&guild_id(), &address(), 5_000)
            .await
            .unwrap_err();

        assert!(matches!(err, ContractError::Reverted { .. }));
        assert_eq!(guilds.guild(&guild_id()).unwrap().treasury_balance, 1_000);
    }

    #[tokio::test]
    async fn unknown_guild_is_not_found() {
        let guilds = guild_system();
        let missing = GuildId::new("nope").unwrap();

        let err = guilds.get_guild_info(&missing).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn amplify_counts_amplifications() {
        let cast = InMemoryCastProtocol::new();
        let content = ContentId::new("post-1").unwrap();

        cast.amplify_content(&content, "farcaster").await.unwrap();
        cast.amplify_content(&content, "lens").await.unwrap();

        assert_eq!(cast.stats(&content).unwrap().amplifications, 2);
    }

    #[tokio::test]
    async fn achievement_unlocks_once() {
        let nft = InMemoryAchievementNft::new();
        let id = AchievementId::new("viral-1").unwrap();

        let first = nft.unlock_achievement(&id, &address()).await.unwrap();
        let second = nft.unlock_achievement(&id, &address()).await;

        assert!(first.tx_hash.starts_with("0x"));
        assert!(second.is_err());
        assert!(nft.has_achievement(&address(), &id).await.unwrap());
        assert_eq!(nft.count_for(&address()), 1);
    }
}
