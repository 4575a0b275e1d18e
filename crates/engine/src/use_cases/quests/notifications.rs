//! Notifications raised when a quest completes.

use chrono::{DateTime, Utc};

use heroquest_domain::{NotificationKind, QuestCompletion, QuestNotification, UserId};

use crate::infrastructure::ports::RandomPort;

/// One `quest_completed`, one `social_achievement` per achievement, and a
/// `social_points_earned` when the quest paid social points.
pub fn for_completion(
    user_id: &UserId,
    completion: &QuestCompletion,
    random: &dyn RandomPort,
    now: DateTime<Utc>,
) -> Vec<QuestNotification> {
    let notify = |kind: NotificationKind, title: &str, message: String| QuestNotification {
        id: random.gen_uuid(),
        user_id: user_id.clone(),
        quest_id: completion.quest_id.clone(),
        kind,
        title: title.to_string(),
        message,
        created_at: now,
    };

    let rewards = &completion.rewards;
    let mut notifications = vec![notify(
        NotificationKind::QuestCompleted,
        "Quest Completed!",
        format!(
            "You completed {} and earned {} EXP and {} coins",
            completion.quest_id, rewards.exp, rewards.coins
        ),
    )];

    notifications.extend(completion.social_achievements.iter().map(|achievement| {
        notify(
            NotificationKind::SocialAchievement,
            "Social Achievement Unlocked!",
            format!("You earned the {achievement} achievement"),
        )
    }));

    if rewards.social_points > 0 {
        notifications.push(notify(
            NotificationKind::SocialPointsEarned,
            "Social Points Earned!",
            format!("+{} social points", rewards.social_points),
        ));
    }

    notifications
}
