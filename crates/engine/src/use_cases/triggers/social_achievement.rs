//! Mints social achievement NFTs once their criteria are met.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use heroquest_domain::{AchievementId, ContentId, GuildId, TriggerResult};

use super::context::{TriggerContext, TriggerError};
use super::engine::TriggerPhases;

pub const SOCIAL_ACHIEVEMENT: &str = "social-achievement";

pub const VIRAL_REACH_THRESHOLD: u64 = 100_000;
pub const COMMUNITY_LEADER_REPUTATION: u64 = 1_000;
pub const SOCIAL_PIONEER_MEMBERS: u32 = 100;

pub const ALREADY_UNLOCKED: &str = "Logro ya desbloqueado";
pub const NOT_ACTIVE_MEMBER: &str = "Usuario no es miembro activo del gremio";
pub const NOT_VIRAL: &str = "Contenido no alcanzó estado viral";
pub const LOW_REPUTATION: &str = "Reputación insuficiente";
pub const GUILD_TOO_SMALL: &str = "Gremio sin suficientes miembros";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    ViralContent,
    CommunityLeader,
    SocialPioneer,
}

impl AchievementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViralContent => "viral_content",
            Self::CommunityLeader => "community_leader",
            Self::SocialPioneer => "social_pioneer",
        }
    }
}

impl fmt::Display for AchievementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementClaim {
    pub id: AchievementId,
    #[serde(rename = "type")]
    pub kind: AchievementType,
    /// Required for `viral_content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<ContentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAchievementPayload {
    pub guild_id: GuildId,
    pub achievement: AchievementClaim,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SocialAchievementTrigger;

impl SocialAchievementTrigger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TriggerPhases for SocialAchievementTrigger {
    fn name(&self) -> &str {
        SOCIAL_ACHIEVEMENT
    }

    fn description(&self) -> &str {
        "Desbloquea logros sociales como NFTs"
    }

    async fn validate(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: SocialAchievementPayload = ctx.payload()?;

        let owned = ctx
            .contracts
            .achievement_nft()?
            .has_achievement(&ctx.sender, &payload.achievement.id)
            .await?;
        if owned {
            return Ok(TriggerResult::failure(ALREADY_UNLOCKED));
        }

        Ok(TriggerResult::success())
    }

    async fn conditions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: SocialAchievementPayload = ctx.payload()?;
        let guild_system = ctx.contracts.guild_system()?;

        let member = guild_system
            .get_member_info(&payload.guild_id, &ctx.sender)
            .await?;
        if !member.is_active {
            return Ok(TriggerResult::failure(NOT_ACTIVE_MEMBER));
        }

        match payload.achievement.kind {
            AchievementType::ViralContent => {
                let content_id = payload.achievement.content_id.as_ref().ok_or_else(|| {
                    TriggerError::invalid_payload("viral_content requiere contentId")
                })?;
                let stats = ctx
                    .contracts
                    .cast_protocol()?
                    .get_content_stats(content_id)
                    .await?;
                if stats.reach < VIRAL_REACH_THRESHOLD {
                    return Ok(TriggerResult::failure(NOT_VIRAL));
                }
            }
            AchievementType::CommunityLeader => {
                if member.reputation < COMMUNITY_LEADER_REPUTATION {
                    return Ok(TriggerResult::failure(LOW_REPUTATION));
                }
            }
            AchievementType::SocialPioneer => {
                let guild = guild_system.get_guild_info(&payload.guild_id).await?;
                if guild.member_count < SOCIAL_PIONEER_MEMBERS {
                    return Ok(TriggerResult::failure(GUILD_TOO_SMALL));
                }
            }
        }

        Ok(TriggerResult::success())
    }

    async fn actions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: SocialAchievementPayload = ctx.payload()?;
        let achievement = &payload.achievement;

        let receipt = ctx
            .contracts
            .achievement_nft()?
            .unlock_achievement(&achievement.id, &ctx.sender)
            .await?;
        ctx.contracts
            .guild_system()?
            .update_guild_stats(&payload.guild_id, achievement.kind.as_str())
            .await?;

        tracing::info!(
            achievement_id = %achievement.id,
            achievement_type = %achievement.kind,
            sender = %ctx.sender,
            "Achievement unlocked"
        );

        Ok(TriggerResult::success_with(json!({
            "achievementId": achievement.id,
            "achievementType": achievement.kind,
            "txHash": receipt.tx_hash,
        }))
        .with_message(format!("Logro {} desbloqueado", achievement.kind)))
    }
}
