//! Built-in quest definitions and their stat bonus table.

use crate::value_objects::{HeroStatBonus, QuestRewards};
use crate::{QuestId, UserId};

use super::quest::{QuestProgress, QuestType};

pub const SOCIAL_YIELD_FARMER_TRIAL: &str = "social-yield-farmer-trial";
pub const GUILD_STAKING_MASTER: &str = "guild-staking-master";
pub const SOCIAL_BUTTERFLY: &str = "social-butterfly";
pub const COMMUNITY_CHAMPION: &str = "community-champion";

/// Identity that receives the default quests when seeding is enabled.
pub const DEFAULT_USER: &str = "default-user";

/// Base hero stat bonus for completing `quest_id`.
pub fn base_stat_bonus(quest_id: &QuestId) -> HeroStatBonus {
    match quest_id.as_str() {
        SOCIAL_YIELD_FARMER_TRIAL => HeroStatBonus::new()
            .with_attack(3)
            .with_magic(2)
            .with_social(2),
        GUILD_STAKING_MASTER => HeroStatBonus::new()
            .with_defense(5)
            .with_attack(2)
            .with_social(3),
        SOCIAL_BUTTERFLY => HeroStatBonus::new().with_social(5).with_magic(1),
        COMMUNITY_CHAMPION => HeroStatBonus::new().with_defense(2).with_social(4),
        _ => HeroStatBonus::new().with_magic(1).with_social(1),
    }
}

fn catalog_quest(
    user_id: UserId,
    id: &'static str,
    quest_type: QuestType,
    max_progress: u32,
    rewards: QuestRewards,
) -> QuestProgress {
    QuestProgress::from_catalog(
        user_id,
        QuestId::from_static(id),
        quest_type,
        max_progress,
        rewards,
    )
}

/// Three-step epic: stake, provide liquidity, start yield farming.
pub fn social_yield_farmer_trial(user_id: UserId) -> QuestProgress {
    catalog_quest(
        user_id,
        SOCIAL_YIELD_FARMER_TRIAL,
        QuestType::Epic,
        3,
        QuestRewards::new(500, 1000)
            .with_items(["Yield Farmer Badge"])
            .with_social_points(100),
    )
    .with_requirements([
        "Stake AVAX in a guild pool",
        "Provide liquidity to a community pair",
        "Start yield farming with your LP tokens",
    ])
}

/// Weekly quest: five stakes of at least 100 tokens.
pub fn guild_staking_master(user_id: UserId) -> QuestProgress {
    catalog_quest(
        user_id,
        GUILD_STAKING_MASTER,
        QuestType::Weekly,
        5,
        QuestRewards::new(300, 750).with_social_points(50),
    )
    .with_requirements(["Stake at least 100 tokens five times"])
}

/// Social quest advanced by social interactions.
pub fn social_butterfly(user_id: UserId) -> QuestProgress {
    catalog_quest(
        user_id,
        SOCIAL_BUTTERFLY,
        QuestType::Social,
        5,
        QuestRewards::new(150, 200),
    )
    .with_requirements(["Interact with your guild five times"])
}

/// Quests every new user starts with.
pub fn default_quests(user_id: &UserId) -> Vec<QuestProgress> {
    vec![
        social_yield_farmer_trial(user_id.clone()),
        guild_staking_master(user_id.clone()),
    ]
}
