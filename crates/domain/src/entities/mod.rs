//! Domain entities: quests and portfolios.

pub mod portfolio;
pub mod quest;
pub mod quest_catalog;

pub use portfolio::{
    CommunityInsight, PortfolioPosition, PortfolioSnapshot, RebalanceAction, RebalancePolicy,
    RebalanceRecommendation, RebalanceReport,
};
pub use quest::{QuestCompletion, QuestProgress, QuestType, UserAction};
