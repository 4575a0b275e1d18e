//! Pays out guild treasury rewards to contributing members.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use heroquest_domain::{GuildId, TriggerResult};

use super::context::{TriggerContext, TriggerError};
use super::engine::TriggerPhases;
use crate::infrastructure::ports::ClockPort;

pub const GUILD_REWARD: &str = "guild-reward";

pub const MAX_REWARD_AMOUNT: u64 = 10_000;
pub const REWARD_COOLDOWN_SECS: i64 = 86_400;
/// A member must have contributed this multiple of the reward.
pub const CONTRIBUTION_MULTIPLIER: u64 = 2;

pub const REWARD_TOO_HIGH: &str = "Recompensa demasiado alta";
pub const INVALID_REWARD_AMOUNT: &str = "Monto de recompensa inválido";
pub const COOLDOWN_ACTIVE: &str = "Debe esperar 24 horas entre recompensas";
pub const INSUFFICIENT_TREASURY: &str = "Fondos insuficientes en el tesoro del gremio";
pub const INSUFFICIENT_CONTRIBUTION: &str = "Contribución insuficiente";

/// Any JSON number is accepted so oversized or fractional amounts get the
/// reward-specific rejection instead of a payload error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildRewardPayload {
    pub guild_id: GuildId,
    pub reward_amount: f64,
}

impl GuildRewardPayload {
    /// Whole-token amount. Only meaningful once `validate` has passed.
    pub fn amount(&self) -> u64 {
        self.reward_amount as u64
    }
}

pub struct GuildRewardTrigger {
    clock: Arc<dyn ClockPort>,
}

impl GuildRewardTrigger {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl TriggerPhases for GuildRewardTrigger {
    fn name(&self) -> &str {
        GUILD_REWARD
    }

    fn description(&self) -> &str {
        "Distribuye recompensas del tesoro del gremio"
    }

    async fn validate(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: GuildRewardPayload = ctx.payload()?;

        let requested = payload.reward_amount;
        if requested > MAX_REWARD_AMOUNT as f64 {
            return Ok(TriggerResult::failure(REWARD_TOO_HIGH));
        }
        if requested < 1.0 || requested.fract() != 0.0 {
            return Ok(TriggerResult::failure(INVALID_REWARD_AMOUNT));
        }

        let member = ctx
            .contracts
            .guild_system()?
            .get_member_info(&payload.guild_id, &ctx.sender)
            .await?;
        if let Some(last_reward_at) = member.last_reward_at {
            let elapsed = self.clock.now() - last_reward_at;
            if elapsed.num_seconds() < REWARD_COOLDOWN_SECS {
                return Ok(TriggerResult::failure(COOLDOWN_ACTIVE));
            }
        }

        Ok(TriggerResult::success())
    }

    async fn conditions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: GuildRewardPayload = ctx.payload()?;
        let guild_system = ctx.contracts.guild_system()?;

        let guild = guild_system.get_guild_info(&payload.guild_id).await?;
        let amount = payload.amount();
        if guild.treasury_balance < amount {
            return Ok(TriggerResult::failure(INSUFFICIENT_TREASURY));
        }

        let member = guild_system
            .get_member_info(&payload.guild_id, &ctx.sender)
            .await?;
        if member.contribution < amount.saturating_mul(CONTRIBUTION_MULTIPLIER) {
            return Ok(TriggerResult::failure(INSUFFICIENT_CONTRIBUTION));
        }

        Ok(TriggerResult::success())
    }

    async fn actions(&self, ctx: &TriggerContext<'_>) -> Result<TriggerResult, TriggerError> {
        let payload: GuildRewardPayload = ctx.payload()?;
        let amount = payload.amount();

        let receipt = ctx
            .contracts
            .guild_system()?
            .distribute_rewards(&payload.guild_id, &ctx.sender, amount)
            .await?;

        tracing::info!(
            guild_id = %payload.guild_id,
            recipient = %ctx.sender,
            amount,
            "Guild reward distributed"
        );

        Ok(TriggerResult::success_with(json!({
            "amount": amount,
            "txHash": receipt.tx_hash,
        }))
        .with_message(format!("Recompensa de {amount} tokens distribuida")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{GuildInfo, GuildMemberInfo, MockGuildSystemPort, TxReceipt};
    use crate::use_cases::triggers::{create_trigger, ContractSet};
    use heroquest_domain::WalletAddress;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn member(contribution: u64, last_reward_at: Option<DateTime<Utc>>) -> GuildMemberInfo {
        GuildMemberInfo {
            is_active: true,
            reputation: 0,
            contribution,
            last_reward_at,
        }
    }

    fn guild(treasury_balance: u64, member: GuildMemberInfo) -> MockGuildSystemPort {
        let mut guild = MockGuildSystemPort::new();
        guild
            .expect_get_member_info()
            .returning(move |_, _| Ok(member.clone()));
        guild.expect_get_guild_info().returning(move |_| {
            Ok(GuildInfo {
                name: "Avalanche Heroes".into(),
                member_count: 10,
                treasury_balance,
                total_social_score: 0,
            })
        });
        guild
    }

    async fn execute(guild: MockGuildSystemPort, amount: u64) -> TriggerResult {
        execute_raw(guild, json!(amount)).await
    }

    async fn execute_raw(guild: MockGuildSystemPort, amount: serde_json::Value) -> TriggerResult {
        let contracts = ContractSet::new().with_guild_system(Arc::new(guild));
        let ctx = TriggerContext::new(
            WalletAddress::new("0xhero").unwrap(),
            json!({ "guildId": "guild-1", "rewardAmount": amount }),
            &contracts,
        );
        create_trigger(GuildRewardTrigger::new(Arc::new(FixedClock(now()))))
            .execute(&ctx)
            .await
    }

    #[tokio::test]
    async fn amount_over_ceiling_is_rejected_without_contract_calls() {
        // No expectations: any contract call would panic the mock.
        let result = execute(MockGuildSystemPort::new(), MAX_REWARD_AMOUNT + 1).await;

        assert_eq!(result, TriggerResult::failure(REWARD_TOO_HIGH));
    }

    #[tokio::test]
    async fn non_integer_amount_over_ceiling_is_too_high() {
        for amount in [json!(1e5), json!(15_000.5)] {
            let result = execute_raw(MockGuildSystemPort::new(), amount).await;

            assert_eq!(result, TriggerResult::failure(REWARD_TOO_HIGH));
        }
    }

    #[tokio::test]
    async fn fractional_or_negative_amount_is_invalid() {
        for amount in [json!(100.5), json!(-5), json!(0.4)] {
            let result = execute_raw(MockGuildSystemPort::new(), amount).await;

            assert_eq!(result, TriggerResult::failure(INVALID_REWARD_AMOUNT));
        }
    }

    #[tokio::test]
    async fn zero_amount_is_rejected() {
        let result = execute(MockGuildSystemPort::new(), 0).await;

        assert_eq!(result, TriggerResult::failure(INVALID_REWARD_AMOUNT));
    }

    #[tokio::test]
    async fn reward_within_cooldown_is_rejected() {
        let last = now() - Duration::seconds(REWARD_COOLDOWN_SECS - 1);

        let result = execute(guild(100_000, member(100_000, Some(last))), 100).await;

        assert_eq!(result, TriggerResult::failure(COOLDOWN_ACTIVE));
    }

    #[tokio::test]
    async fn empty_treasury_is_rejected() {
        let result = execute(guild(50, member(1_000, None)), 100).await;

        assert_eq!(result, TriggerResult::failure(INSUFFICIENT_TREASURY));
    }

    #[tokio::test]
    async fn contribution_must_double_the_reward() {
        let result = execute(guild(10_000, member(199, None)), 100).await;

        assert_eq!(result, TriggerResult::failure(INSUFFICIENT_CONTRIBUTION));
    }

    #[tokio::test]
    async fn distributes_after_cooldown() {
        let last = now() - Duration::seconds(REWARD_COOLDOWN_SECS);
        let mut guild = guild(10_000, member(200, Some(last)));
        guild
            .expect_distribute_rewards()
            .withf(|_, _, amount| *amount == 100)
            .times(1)
            .returning(|_, _, _| Ok(TxReceipt::new("0xpaid")));

        let result = execute(guild, 100).await;

        assert!(result.is_success(), "{result:?}");
        assert_eq!(result.data, Some(json!({ "amount": 100, "txHash": "0xpaid" })));
    }
}
