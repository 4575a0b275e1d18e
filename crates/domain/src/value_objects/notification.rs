//! User-facing notifications emitted on quest completion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{QuestId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    QuestCompleted,
    SocialAchievement,
    SocialPointsEarned,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuestCompleted => write!(f, "quest_completed"),
            Self::SocialAchievement => write!(f, "social_achievement"),
            Self::SocialPointsEarned => write!(f, "social_points_earned"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestNotification {
    pub id: Uuid,
    pub user_id: UserId,
    pub quest_id: QuestId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
