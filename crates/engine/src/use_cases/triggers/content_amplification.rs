//! Rewards guild members for amplifying content with a signed social proof.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use heroquest_domain::{ContentId, GuildId, TriggerResult};

use super::context::{TriggerContext, TriggerError};
use super::engine::TriggerPhases;
use crate::infrastructure::ports::{ClockPort, SignatureVerifierPort};

pub const CONTENT_AMPLIFICATION: &str = "content-amplification";

/// Oldest social proof accepted, in seconds.
pub const PROOF_MAX_AGE_SECS: i64 = 3_600;

pub const INVALID_SIGNATURE: &str = "Firma inválida";
pub const PROOF_EXPIRED: &str = "Prueba social expirada";
pub const NOT_ACTIVE_MEMBER: &str = "Usuario no es miembro activo del gremio";
pub const INSUFFICIENT_REACH: &str = "Alcance o engagement insuficiente";

#[derive(Debug, Clone, PartialEq)]
pub struct ContentAmplificationConfig {
    pub min_reach: u64,
    pub min_engagement: u64,
    pub reward_multiplier: f64,
}

impl Default for ContentAmplificationConfig {
    fn default() -> Self {
        Self {
            min_reach: 1_000,
            min_engagement: 50,
            reward_multiplier: 0.1,
        }
    }
}

impl ContentAmplificationConfig {
    pub fn reward_for(&self, reach: u64) -> u64 {
        (reach as f64 * self.reward_multiplier).floor().max(0.0) as u64
    }
}

/// A signed claim about a piece of content's reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAmplificationPayload {
    pub content_id: ContentId,
    pub platform: String,
    pub reach: u64,
    pub engagement: u64,
    /// Unix seconds at which the proof was signed.
    pub timestamp: i64,
    pub signature: String,
    pub guild_id: GuildId,
}

impl ContentAmplificationPayload {
    /// The exact bytes the sender signs.
    pub fn proof_message(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.content_id, self.platform, self.reach, self.engagement, self.timestamp
        )
    }
}

pub struct ContentAmplificationTrigger {
    config: ContentAmplificationConfig,
    verifier: Arc<dyn SignatureVerifierPort>,
    clock: Arc<dyn ClockPort>,
}

impl ContentAmplificationTrigger {
    pub fn new(
        config: ContentAmplificationConfig,
        verifier: Arc<dyn SignatureVerifierPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            config,
            verifier,
            clock,
        }
    }
}

#[async_trait]
impl TriggerPhases for ContentAmplificationTrigger {
    fn name(&self) -> &str {
        CONTENT_AMPLIFICATION
    }

    fn description(&self) -> &str {
        "Amplifica contenido social y recompensa al creador con tokens del gremio"
    }

    async fn validate(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: ContentAmplificationPayload = ctx.payload()?;

        let signed = self
            .verifier
            .verify(&payload.proof_message(), &payload.signature, &ctx.sender)?;
        if !signed {
            return Ok(TriggerResult::failure(INVALID_SIGNATURE));
        }

        // Future timestamps give a negative age and pass. Saturates so an
        // absurdly old timestamp still reads as expired.
        let age = self.clock.now().timestamp().saturating_sub(payload.timestamp);
        if age > PROOF_MAX_AGE_SECS {
            return Ok(TriggerResult::failure(PROOF_EXPIRED));
        }

        Ok(TriggerResult::success())
    }

    async fn conditions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: ContentAmplificationPayload = ctx.payload()?;

        let member = ctx
            .contracts
            .guild_system()?
            .get_member_info(&payload.guild_id, &ctx.sender)
            .await?;
        if !member.is_active {
            return Ok(TriggerResult::failure(NOT_ACTIVE_MEMBER));
        }

        if payload.reach < self.config.min_reach || payload.engagement < self.config.min_engagement
        {
            return Ok(TriggerResult::failure(INSUFFICIENT_REACH));
        }

        Ok(TriggerResult::success())
    }

    async fn actions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: ContentAmplificationPayload = ctx.payload()?;
        let guild_system = ctx.contracts.guild_system()?;
        let cast_protocol = ctx.contracts.cast_protocol()?;

        let amplify = cast_protocol
            .amplify_content(&payload.content_id, &payload.platform)
            .await?;

        let reward = self.config.reward_for(payload.reach);
        let reward_tx = guild_system
            .distribute_rewards(&payload.guild_id, &ctx.sender, reward)
            .await?;

        tracing::info!(
            content_id = %payload.content_id,
            platform = %payload.platform,
            reward,
            "Content amplified"
        );

        Ok(TriggerResult::success_with(json!({
            "reward": reward,
            "amplifyTx": amplify.tx_hash,
            "rewardTx": reward_tx.tx_hash,
        }))
        .with_message(format!("Contenido amplificado. Recompensa: {reward} tokens")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use ed25519_dalek::SigningKey;
    use mockall::predicate::eq;

    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        GuildMemberInfo, MockCastProtocolPort, MockGuildSystemPort, TxReceipt,
    };
    use crate::infrastructure::signature::test_keys::{address_of, sign_hex, signing_key};
    use crate::infrastructure::signature::Ed25519SignatureVerifier;
    use crate::use_cases::triggers::{create_trigger, ContractSet};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn trigger() -> crate::use_cases::triggers::Trigger {
        create_trigger(ContentAmplificationTrigger::new(
            ContentAmplificationConfig::default(),
            Arc::new(Ed25519SignatureVerifier::new()),
            Arc::new(FixedClock(now())),
        ))
    }

    fn signed_payload(key: &SigningKey, reach: u64, engagement: u64, age_secs: i64) -> serde_json::Value {
        signed_payload_at(key, reach, engagement, now().timestamp() - age_secs)
    }

    fn signed_payload_at(
        key: &SigningKey,
        reach: u64,
        engagement: u64,
        timestamp: i64,
    ) -> serde_json::Value {
        let mut payload = ContentAmplificationPayload {
            content_id: ContentId::new("cast-42").unwrap(),
            platform: "farcaster".into(),
            reach,
            engagement,
            timestamp,
            signature: String::new(),
            guild_id: GuildId::new("guild-1").unwrap(),
        };
        payload.signature = sign_hex(key, &payload.proof_message());
        serde_json::to_value(payload).unwrap()
    }

    fn member(is_active: bool) -> GuildMemberInfo {
        GuildMemberInfo {
            is_active,
            reputation: 0,
            contribution: 0,
            last_reward_at: None,
        }
    }

    fn guild_with_member(is_active: bool) -> MockGuildSystemPort {
        let mut guild = MockGuildSystemPort::new();
        guild
            .expect_get_member_info()
            .returning(move |_, _| Ok(member(is_active)));
        guild
    }

    #[test]
    fn proof_message_joins_fields_in_order() {
        let payload = ContentAmplificationPayload {
            content_id: ContentId::new("cast-42").unwrap(),
            platform: "lens".into(),
            reach: 5_000,
            engagement: 120,
            timestamp: 1_714_564_800,
            signature: "00".into(),
            guild_id: GuildId::new("guild-1").unwrap(),
        };

        assert_eq!(payload.proof_message(), "cast-42:lens:5000:120:1714564800");
    }

    #[test]
    fn reward_is_floored() {
        let config = ContentAmplificationConfig::default();

        assert_eq!(config.reward_for(5_000), 500);
        assert_eq!(config.reward_for(1_239), 123);
    }

    #[tokio::test]
    async fn amplifies_and_rewards_active_member() {
        let key = signing_key(7);
        let sender = address_of(&key);

        let mut guild = guild_with_member(true);
        guild
            .expect_distribute_rewards()
            .with(
                eq(GuildId::new("guild-1").unwrap()),
                eq(sender.clone()),
                eq(500_u64),
            )
            .times(1)
            .returning(|_, _, _| Ok(TxReceipt::new("0xreward")));
        let mut cast = MockCastProtocolPort::new();
        cast.expect_amplify_content()
            .times(1)
            .returning(|_, _| Ok(TxReceipt::new("0xamplify")));
        let contracts = ContractSet::new()
            .with_guild_system(Arc::new(guild))
            .with_cast_protocol(Arc::new(cast));
        let ctx = TriggerContext::new(sender, signed_payload(&key, 5_000, 120, 60), &contracts);

        let result = trigger().execute(&ctx).await;

        assert!(result.is_success(), "{result:?}");
        assert_eq!(
            result.data,
            Some(json!({"reward": 500, "amplifyTx": "0xamplify", "rewardTx": "0xreward"}))
        );
    }

    #[tokio::test]
    async fn stale_proof_is_rejected_even_with_valid_signature() {
        let key = signing_key(7);
        let contracts = ContractSet::new()
            .with_guild_system(Arc::new(MockGuildSystemPort::new()))
            .with_cast_protocol(Arc::new(MockCastProtocolPort::new()));
        let ctx = TriggerContext::new(
            address_of(&key),
            signed_payload(&key, 5_000, 120, PROOF_MAX_AGE_SECS + 1),
            &contracts,
        );

        let result = trigger().execute(&ctx).await;

        assert_eq!(result, TriggerResult::failure(PROOF_EXPIRED));
    }

    #[tokio::test]
    async fn minimum_timestamp_is_expired_not_overflowed() {
        let key = signing_key(7);
        let contracts = ContractSet::new().with_guild_system(Arc::new(guild_with_member(false)));
        let ctx = TriggerContext::new(
            address_of(&key),
            signed_payload_at(&key, 5_000, 120, i64::MIN),
            &contracts,
        );

        let result = trigger().execute(&ctx).await;

        assert_eq!(result, TriggerResult::failure(PROOF_EXPIRED));
    }

    #[tokio::test]
    async fn proof_at_exact_limit_and_future_proof_are_fresh() {
        let key = signing_key(7);
        let contracts = ContractSet::new().with_guild_system(Arc::new(guild_with_member(false)));

        for age in [PROOF_MAX_AGE_SECS, -300] {
            let ctx = TriggerContext::new(
                address_of(&key),
                signed_payload(&key, 5_000, 120, age),
                &contracts,
            );

            let result = trigger().execute(&ctx).await;

            // Got past validate into conditions.
            assert_eq!(result, TriggerResult::failure(NOT_ACTIVE_MEMBER));
        }
    }

    #[tokio::test]
    async fn signature_from_another_key_is_rejected() {
        let signer = signing_key(7);
        let claimed_sender = address_of(&signing_key(9));
        let contracts = ContractSet::new();
        let ctx = TriggerContext::new(
            claimed_sender,
            signed_payload(&signer, 5_000, 120, 0),
            &contracts,
        );

        let result = trigger().execute(&ctx).await;

        assert_eq!(result, TriggerResult::failure(INVALID_SIGNATURE));
    }

    #[tokio::test]
    async fn inactive_member_is_rejected() {
        let key = signing_key(7);
        let contracts = ContractSet::new().with_guild_system(Arc::new(guild_with_member(false)));
        let ctx = TriggerContext::new(address_of(&key), signed_payload(&key, 5_000, 120, 0), &contracts);

        let result = trigger().execute(&ctx).await;

        assert_eq!(result, TriggerResult::failure(NOT_ACTIVE_MEMBER));
    }

    #[tokio::test]
    async fn low_engagement_is_rejected() {
        let key = signing_key(7);
        let contracts = ContractSet::new().with_guild_system(Arc::new(guild_with_member(true)));
        let ctx = TriggerContext::new(address_of(&key), signed_payload(&key, 5_000, 49, 0), &contracts);

        let result = trigger().execute(&ctx).await;

        assert_eq!(result, TriggerResult::failure(INSUFFICIENT_REACH));
    }

    #[tokio::test]
    async fn reach_just_under_minimum_is_rejected() {
        let key = signing_key(7);
        let contracts = ContractSet::new().with_guild_system(Arc::new(guild_with_member(true)));
        let ctx = TriggerContext::new(address_of(&key), signed_payload(&key, 999, 120, 0), &contracts);

        let result = trigger().execute(&ctx).await;

        assert_eq!(result, TriggerResult::failure(INSUFFICIENT_REACH));
    }

    #[tokio::test]
    async fn missing_cast_protocol_fails_cleanly() {
        let key = signing_key(7);
        let contracts = ContractSet::new().with_guild_system(Arc::new(guild_with_member(true)));
        let ctx = TriggerContext::new(address_of(&key), signed_payload(&key, 5_000, 120, 0), &contracts);

        let result = trigger().execute(&ctx).await;

        assert_eq!(
            result,
            TriggerResult::failure("Contrato no configurado: castProtocol")
        );
    }
}
