//! HeroQuest domain: quest progress rules, rewards, trigger outcomes and
//! portfolio rebalancing policy. No I/O lives here.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    quest_catalog, CommunityInsight, PortfolioPosition, PortfolioSnapshot, QuestCompletion,
    QuestProgress, QuestType, RebalanceAction, RebalancePolicy, RebalanceRecommendation,
    RebalanceReport, UserAction,
};

pub use error::DomainError;

pub use ids::{AchievementId, ContentId, GuildId, QuestId, UserId, WalletAddress};

pub use value_objects::{
    ActionSocialContext, HeroStatBonus, NotificationKind, QuestNotification, QuestRewards,
    QuestSocialContext, TriggerResult,
};
