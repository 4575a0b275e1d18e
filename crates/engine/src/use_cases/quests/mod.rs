//! Quest monitoring use cases.
//!
//! Turns user actions into quest progress, completions and notifications, and
//! periodically sweeps out expired quests.

mod notifications;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use heroquest_domain::{
    ActionSocialContext, QuestCompletion, QuestNotification, UserAction, UserId,
};

use crate::infrastructure::ports::{ClockPort, RandomPort};
use crate::infrastructure::scheduler::{JobError, ScheduledJob};
use crate::stores::QuestProgressStore;

pub const QUEST_MONITOR_JOB: &str = "quest-monitor";
pub const DEFAULT_QUEST_CHECK_INTERVAL: Duration = Duration::from_secs(300);

/// An action reported by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActionEvent {
    pub user_id: UserId,
    pub action: UserAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_context: Option<ActionSocialContext>,
}

impl UserActionEvent {
    pub fn new(user_id: UserId, action: impl Into<UserAction>) -> Self {
        Self {
            user_id,
            action: action.into(),
            amount: None,
            social_context: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_social_context(mut self, social_context: ActionSocialContext) -> Self {
        self.social_context = Some(social_context);
        self
    }
}

/// What one action earned. Totals cover this call only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorResult {
    pub user_id: UserId,
    pub action: UserAction,
    pub completed_quests: Vec<QuestCompletion>,
    pub notifications: Vec<QuestNotification>,
    pub total_exp_earned: u64,
    pub total_coins_earned: u64,
    pub total_social_points: u64,
    pub social_achievements: Vec<String>,
}

impl MonitorResult {
    fn empty(user_id: UserId, action: UserAction) -> Self {
        Self {
            user_id,
            action,
            completed_quests: Vec::new(),
            notifications: Vec::new(),
            total_exp_earned: 0,
            total_coins_earned: 0,
            total_social_points: 0,
            social_achievements: Vec::new(),
        }
    }
}

pub struct QuestMonitor {
    store: Arc<QuestProgressStore>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl QuestMonitor {
    pub fn new(
        store: Arc<QuestProgressStore>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            store,
            clock,
            random,
        }
    }

    pub fn store(&self) -> &QuestProgressStore {
        &self.store
    }

    /// Apply `event` to every active quest of the user, in order.
    ///
    /// Quests that reach their maximum are removed and reported as
    /// completions. Unknown users get an empty result and no entry is created.
    pub fn monitor_user_action(&self, event: UserActionEvent) -> MonitorResult {
        let now = self.clock.now();
        let UserActionEvent {
            user_id,
            action,
            amount,
            social_context,
        } = event;

        let completions = self.store.update(&user_id, |quests| {
            let mut completed = Vec::new();
            for quest in std::mem::take(quests) {
                let updated = quest.apply_action(&action, amount, social_context.as_ref());
                if updated.is_complete() {
                    completed.push(QuestCompletion::from_quest(&updated, now));
                } else {
                    quests.push(updated);
                }
            }
            completed
        });

        let Some(completions) = completions else {
            tracing::debug!(user_id = %user_id, action = %action, "No active quests for user");
            return MonitorResult::empty(user_id, action);
        };

        let mut result = MonitorResult::empty(user_id, action);
        for completion in completions {
            tracing::info!(
                user_id = %result.user_id,
                quest_id = %completion.quest_id,
                exp = completion.rewards.exp,
                coins = completion.rewards.coins,
                "Quest completed"
            );

            result.notifications.extend(notifications::for_completion(
                &result.user_id,
                &completion,
                self.random.as_ref(),
                now,
            ));
            result.total_exp_earned += u64::from(completion.rewards.exp);
            result.total_coins_earned += u64::from(completion.rewards.coins);
            result.total_social_points += u64::from(completion.rewards.social_points);
            result
                .social_achievements
                .extend(completion.social_achievements.iter().cloned());
            result.completed_quests.push(completion);
        }

        result
    }

    pub fn trigger_quest_check(
        &self,
        user_id: UserId,
        action: impl Into<UserAction>,
        amount: Option<f64>,
        social_context: Option<ActionSocialContext>,
    ) -> MonitorResult {
        self.monitor_user_action(UserActionEvent {
            user_id,
            action: action.into(),
            amount,
            social_context,
        })
    }

    /// Drop quests whose deadline has passed. Returns how many were removed.
    pub fn periodic_check(&self) -> usize {
        let now = self.clock.now();
        let expired = self.store.remove_where(|quest| quest.is_expired(now));
        for quest in &expired {
            tracing::info!(user_id = %quest.user_id, quest_id = %quest.quest_id, "Quest expired");
        }
        expired.len()
    }
}

#[async_trait]
impl ScheduledJob for QuestMonitor {
    fn name(&self) -> &'static str {
        QUEST_MONITOR_JOB
    }

    async fn tick(&self) -> Result<(), JobError> {
        let expired = self.periodic_check();
        tracing::debug!(expired, "Quest check complete");
        Ok(())
    }
}
