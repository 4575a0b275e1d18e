//! Trigger use cases.
//!
//! A trigger is a named, three-phase guarded operation against contract
//! capability ports. The social triggers are the concrete definitions.

mod content_amplification;
mod context;
mod engine;
mod guild_reward;
mod registry;
mod social_achievement;

pub use content_amplification::{
    ContentAmplificationConfig, ContentAmplificationPayload, ContentAmplificationTrigger,
    CONTENT_AMPLIFICATION, PROOF_MAX_AGE_SECS,
};
pub use context::{ContractSet, TriggerContext, TriggerError};
pub use engine::{create_trigger, Trigger, TriggerPhase, TriggerPhases, UNKNOWN_ERROR_MESSAGE};
pub use guild_reward::{
    GuildRewardPayload, GuildRewardTrigger, GUILD_REWARD, MAX_REWARD_AMOUNT, REWARD_COOLDOWN_SECS,
};
pub use registry::TriggerRegistry;
pub use social_achievement::{
    AchievementClaim, AchievementType, SocialAchievementPayload, SocialAchievementTrigger,
    SOCIAL_ACHIEVEMENT,
};

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, SignatureVerifierPort};

/// Container for the social trigger set.
pub struct SocialTriggers {
    pub content_amplification: Trigger,
    pub social_achievement: Trigger,
    pub guild_reward: Trigger,
}

impl SocialTriggers {
    pub fn new(
        amplification: ContentAmplificationConfig,
        verifier: Arc<dyn SignatureVerifierPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            content_amplification: create_trigger(ContentAmplificationTrigger::new(
                amplification,
                verifier,
                clock.clone(),
            )),
            social_achievement: create_trigger(SocialAchievementTrigger::new()),
            guild_reward: create_trigger(GuildRewardTrigger::new(clock)),
        }
    }

    pub fn registry(&self) -> TriggerRegistry {
        TriggerRegistry::new()
            .with(self.content_amplification.clone())
            .with(self.social_achievement.clone())
            .with(self.guild_reward.clone())
    }
}
