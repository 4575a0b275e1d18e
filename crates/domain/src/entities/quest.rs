//! Quest progress and completion
//!
//! A quest is a multi-step objective tracked per user. Progress advances as
//! the user performs on-chain actions; once `progress` reaches `max_progress`
//! the quest is complete and a [`QuestCompletion`] is produced.
//!
//! The action-to-quest rules live in [`QuestProgress::apply_action`]:
//!
//! | action               | quest                                  | effect                          |
//! |----------------------|----------------------------------------|---------------------------------|
//! | `stake`              | `social-yield-farmer-trial` at 0       | progress 1, guild bonus         |
//! | `stake`              | `guild-staking-master`, amount >= 100  | progress + 1                    |
//! | `liquidity`          | `social-yield-farmer-trial` at 1       | progress 2, validation bonus    |
//! | `yield-farm`         | `social-yield-farmer-trial` at 2       | progress 3                      |
//! | `social_interaction` | any social quest                       | progress + 1, +10 social points |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quest_catalog::{self, GUILD_STAKING_MASTER, SOCIAL_YIELD_FARMER_TRIAL};
use crate::value_objects::{ActionSocialContext, HeroStatBonus, QuestRewards, QuestSocialContext};
use crate::{DomainError, QuestId, UserId};

/// Minimum staked amount that counts towards `guild-staking-master`.
pub const GUILD_STAKING_MIN_AMOUNT: f64 = 100.0;
/// Exp bonus per guild member joining a stake.
pub const GUILD_MEMBER_EXP_BONUS: f64 = 0.1;
/// Ceiling on the guild member exp bonus.
pub const MAX_GUILD_EXP_BONUS: f64 = 0.5;
pub const GUILD_STAKE_SOCIAL_POINTS: u32 = 50;
pub const COMMUNITY_VALIDATION_SOCIAL_POINTS: u32 = 25;
pub const SOCIAL_INTERACTION_SOCIAL_POINTS: u32 = 10;

/// Collaborator count at which a quest earns "Community Leader".
const COMMUNITY_LEADER_COLLABORATORS: usize = 3;
/// Social points at which a quest earns "Social DeFi Pioneer".
const SOCIAL_PIONEER_POINTS: u32 = 100;
const GUILD_SOCIAL_STAT_BONUS: u32 = 2;
const MAX_COLLABORATOR_STAT_BONUS: usize = 3;

pub const ACHIEVEMENT_GUILD_COLLABORATOR: &str = "Guild Collaborator";
pub const ACHIEVEMENT_COMMUNITY_LEADER: &str = "Community Leader";
pub const ACHIEVEMENT_SOCIAL_DEFI_PIONEER: &str = "Social DeFi Pioneer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Daily,
    Weekly,
    Epic,
    Social,
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Epic => write!(f, "epic"),
            Self::Social => write!(f, "social"),
        }
    }
}

impl FromStr for QuestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "epic" => Ok(Self::Epic),
            "social" => Ok(Self::Social),
            other => Err(DomainError::parse(format!("Unknown quest type: {}", other))),
        }
    }
}

/// A discrete user action reported to the quest monitor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserAction {
    Stake,
    Liquidity,
    YieldFarm,
    SocialInteraction,
    /// Any action no quest rule reacts to.
    Other(String),
}

impl UserAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stake => "stake",
            Self::Liquidity => "liquidity",
            Self::YieldFarm => "yield-farm",
            Self::SocialInteraction => "social_interaction",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for UserAction {
    fn from(value: &str) -> Self {
        match value {
            "stake" => Self::Stake,
            "liquidity" => Self::Liquidity,
            "yield-farm" => Self::YieldFarm,
            "social_interaction" => Self::SocialInteraction,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for UserAction {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<UserAction> for String {
    fn from(value: UserAction) -> Self {
        value.as_str().to_string()
    }
}

/// A user's in-flight progress on one quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuestProgressSerde")]
pub struct QuestProgress {
    pub user_id: UserId,
    pub quest_id: QuestId,
    pub quest_type: QuestType,
    progress: u32,
    max_progress: u32,
    pub requirements: Vec<String>,
    pub rewards: QuestRewards,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_context: Option<QuestSocialContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestProgressSerde {
    user_id: UserId,
    quest_id: QuestId,
    quest_type: QuestType,
    progress: u32,
    max_progress: u32,
    #[serde(default)]
    requirements: Vec<String>,
    rewards: QuestRewards,
    #[serde(default)]
    social_context: Option<QuestSocialContext>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl TryFrom<QuestProgressSerde> for QuestProgress {
    type Error = DomainError;

    fn try_from(value: QuestProgressSerde) -> Result<Self, Self::Error> {
        if value.progress > value.max_progress {
            return Err(DomainError::validation(format!(
                "Quest {} progress {} exceeds maximum {}",
                value.quest_id, value.progress, value.max_progress
            )));
        }
        let mut quest = Self::new(
            value.user_id,
            value.quest_id,
            value.quest_type,
            value.max_progress,
            value.rewards,
        )?;
        quest.progress = value.progress;
        quest.requirements = value.requirements;
        quest.social_context = value.social_context;
        quest.expires_at = value.expires_at;
        Ok(quest)
    }
}

impl QuestProgress {
    /// Create a quest at zero progress.
    ///
    /// # Errors
    /// Returns a validation error when `max_progress` is zero.
    pub fn new(
        user_id: UserId,
        quest_id: QuestId,
        quest_type: QuestType,
        max_progress: u32,
        rewards: QuestRewards,
    ) -> Result<Self, DomainError> {
        if max_progress == 0 {
            return Err(DomainError::validation(format!(
                "Quest {} must require at least one step",
                quest_id
            )));
        }
        Ok(Self {
            user_id,
            quest_id,
            quest_type,
            progress: 0,
            max_progress,
            requirements: Vec::new(),
            rewards,
            social_context: None,
            expires_at: None,
        })
    }

    /// Build a catalog quest whose definition is known to be valid.
    pub(crate) fn from_catalog(
        user_id: UserId,
        quest_id: QuestId,
        quest_type: QuestType,
        max_progress: u32,
        rewards: QuestRewards,
    ) -> Self {
        Self {
            user_id,
            quest_id,
            quest_type,
            progress: 0,
            max_progress: max_progress.max(1),
            requirements: Vec::new(),
            rewards,
            social_context: None,
            expires_at: None,
        }
    }

    pub fn with_requirements(
        mut self,
        requirements: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.requirements = requirements.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_social_context(mut self, context: QuestSocialContext) -> Self {
        self.social_context = Some(context);
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Start the quest part-way through, clamped to the maximum.
    pub fn with_progress(mut self, progress: u32) -> Self {
        self.progress = progress.min(self.max_progress);
        self
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn max_progress(&self) -> u32 {
        self.max_progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.max_progress
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    fn advance(&mut self) {
        self.progress = self.progress.saturating_add(1).min(self.max_progress);
    }

    fn set_progress(&mut self, progress: u32) {
        self.progress = progress.min(self.max_progress);
    }

    /// Compute the quest state after `action`.
    ///
    /// Unmatched actions return an unchanged copy. Progress never decreases
    /// and never exceeds `max_progress`.
    pub fn apply_action(
        &self,
        action: &UserAction,
        amount: Option<f64>,
        social: Option<&ActionSocialContext>,
    ) -> QuestProgress {
        let mut next = self.clone();
        let quest_id = self.quest_id.as_str();

        match action {
            UserAction::Stake if quest_id == SOCIAL_YIELD_FARMER_TRIAL && self.progress == 0 => {
                next.set_progress(1);
                if let Some(ctx) = social.filter(|ctx| !ctx.guild_members.is_empty()) {
                    let bonus = (ctx.guild_members.len() as f64 * GUILD_MEMBER_EXP_BONUS)
                        .min(MAX_GUILD_EXP_BONUS);
                    next.rewards.apply_exp_bonus(bonus);
                    next.rewards.add_social_points(GUILD_STAKE_SOCIAL_POINTS);
                }
            }
            UserAction::Stake
                if quest_id == GUILD_STAKING_MASTER
                    && amount.is_some_and(|amount| amount >= GUILD_STAKING_MIN_AMOUNT) =>
            {
                next.advance();
            }
            UserAction::Liquidity if quest_id == SOCIAL_YIELD_FARMER_TRIAL && self.progress == 1 => {
                next.set_progress(2);
                if social.is_some_and(|ctx| ctx.community_validation) {
                    next.rewards
                        .add_social_points(COMMUNITY_VALIDATION_SOCIAL_POINTS);
                }
            }
            UserAction::YieldFarm if quest_id == SOCIAL_YIELD_FARMER_TRIAL && self.progress == 2 => {
                next.set_progress(3);
            }
            UserAction::SocialInteraction if self.quest_type == QuestType::Social => {
                next.advance();
                next.rewards
                    .add_social_points(SOCIAL_INTERACTION_SOCIAL_POINTS);
            }
            _ => {}
        }

        next
    }
}

/// Record of a quest finishing, with the payout it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCompletion {
    pub quest_id: QuestId,
    pub completed_at: DateTime<Utc>,
    pub rewards: QuestRewards,
    pub hero_stat_bonus: HeroStatBonus,
    pub social_achievements: Vec<String>,
}

impl QuestCompletion {
    /// Build the completion record for a finished quest.
    pub fn from_quest(quest: &QuestProgress, completed_at: DateTime<Utc>) -> Self {
        Self {
            quest_id: quest.quest_id.clone(),
            completed_at,
            rewards: quest.rewards.clone(),
            hero_stat_bonus: hero_stat_bonus(quest),
            social_achievements: social_achievements(quest),
        }
    }
}

fn hero_stat_bonus(quest: &QuestProgress) -> HeroStatBonus {
    let mut bonus = quest_catalog::base_stat_bonus(&quest.quest_id);

    if let Some(ctx) = &quest.social_context {
        if ctx.guild_id.is_some() {
            bonus.add_social(GUILD_SOCIAL_STAT_BONUS);
        }
        if !ctx.collaborators.is_empty() {
            let extra = ctx.collaborators.len().min(MAX_COLLABORATOR_STAT_BONUS);
            bonus.add_social(extra as u32);
        }
    }

    bonus
}

fn social_achievements(quest: &QuestProgress) -> Vec<String> {
    let mut achievements = Vec::new();

    if let Some(ctx) = &quest.social_context {
        if ctx.guild_id.is_some() {
            achievements.push(ACHIEVEMENT_GUILD_COLLABORATOR.to_string());
        }
        if ctx.collaborators.len() >= COMMUNITY_LEADER_COLLABORATORS {
            achievements.push(ACHIEVEMENT_COMMUNITY_LEADER.to_string());
        }
    }
    if quest.rewards.social_points >= SOCIAL_PIONEER_POINTS {
        achievements.push(ACHIEVEMENT_SOCIAL_DEFI_PIONEER.to_string());
    }

    achievements
}
