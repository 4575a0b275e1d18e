//! Value objects shared by quests and triggers.

mod notification;
mod rewards;
mod social_context;
mod trigger_result;

pub use notification::{NotificationKind, QuestNotification};
pub use rewards::{HeroStatBonus, QuestRewards};
pub use social_context::{ActionSocialContext, QuestSocialContext};
pub use trigger_result::TriggerResult;
