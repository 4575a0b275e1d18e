//! Inputs shared by every trigger phase.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use heroquest_domain::WalletAddress;

use crate::infrastructure::ports::{
    AchievementNftPort, CastProtocolPort, ContractError, GuildSystemPort, SignatureError,
};

/// Unexpected failures inside a trigger phase.
///
/// Business rejections are `Ok(TriggerResult::failure(..))`; these are the
/// cases the engine converts into a failed result on the caller's behalf.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriggerError {
    #[error("Contrato no configurado: {0}")]
    MissingContract(&'static str),

    #[error("Datos de trigger inválidos: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}

impl TriggerError {
    pub fn invalid_payload(message: impl ToString) -> Self {
        Self::InvalidPayload(message.to_string())
    }
}

/// Contract clients available to a trigger, keyed by logical name.
#[derive(Clone, Default)]
pub struct ContractSet {
    guild_system: Option<Arc<dyn GuildSystemPort>>,
    cast_protocol: Option<Arc<dyn CastProtocolPort>>,
    achievement_nft: Option<Arc<dyn AchievementNftPort>>,
}

impl ContractSet {
    pub const GUILD_SYSTEM: &'static str = "guildSystem";
    pub const CAST_PROTOCOL: &'static str = "castProtocol";
    pub const ACHIEVEMENT_NFT: &'static str = "achievementNFT";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guild_system(mut self, guild_system: Arc<dyn GuildSystemPort>) -> Self {
        self.guild_system = Some(guild_system);
        self
    }

    pub fn with_cast_protocol(mut self, cast_protocol: Arc<dyn CastProtocolPort>) -> Self {
        self.cast_protocol = Some(cast_protocol);
        self
    }

    pub fn with_achievement_nft(mut self, achievement_nft: Arc<dyn AchievementNftPort>) -> Self {
        self.achievement_nft = Some(achievement_nft);
        self
    }

    pub fn guild_system(&self) -> Result<&dyn GuildSystemPort, TriggerError> {
        self.guild_system
            .as_deref()
            .ok_or(TriggerError::MissingContract(Self::GUILD_SYSTEM))
    }

    pub fn cast_protocol(&self) -> Result<&dyn CastProtocolPort, TriggerError> {
        self.cast_protocol
            .as_deref()
            .ok_or(TriggerError::MissingContract(Self::CAST_PROTOCOL))
    }

    pub fn achievement_nft(&self) -> Result<&dyn AchievementNftPort, TriggerError> {
        self.achievement_nft
            .as_deref()
            .ok_or(TriggerError::MissingContract(Self::ACHIEVEMENT_NFT))
    }
}

impl fmt::Debug for ContractSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractSet")
            .field(Self::GUILD_SYSTEM, &self.guild_system.is_some())
            .field(Self::CAST_PROTOCOL, &self.cast_protocol.is_some())
            .field(Self::ACHIEVEMENT_NFT, &self.achievement_nft.is_some())
            .finish()
    }
}

/// One trigger invocation: who is acting, with what payload, against which
/// contracts. Contracts are borrowed for the duration of `execute`.
#[derive(Debug, Clone)]
pub struct TriggerContext<'a> {
    pub sender: WalletAddress,
    pub data: serde_json::Value,
    pub contracts: &'a ContractSet,
}

impl<'a> TriggerContext<'a> {
    pub fn new(sender: WalletAddress, data: serde_json::Value, contracts: &'a ContractSet) -> Self {
        Self {
            sender,
            data,
            contracts,
        }
    }

    /// Decode the untyped payload into a trigger's own payload type.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, TriggerError> {
        T::deserialize(&self.data).map_err(TriggerError::invalid_payload)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload {
        guild_id: String,
        reward_amount: u64,
    }

    #[test]
    fn decodes_camel_case_payload() {
        let contracts = ContractSet::new();
        let ctx = TriggerContext::new(
            WalletAddress::new("0xabc").unwrap(),
            json!({"guildId": "g-1", "rewardAmount": 500}),
            &contracts,
        );

        let payload: Payload = ctx.payload().unwrap();

        assert_eq!(payload.guild_id, "g-1");
        assert_eq!(payload.reward_amount, 500);
    }

    #[test]
    fn malformed_payload_is_invalid() {
        let contracts = ContractSet::new();
        let ctx = TriggerContext::new(
            WalletAddress::new("0xabc").unwrap(),
            json!({"guildId": "g-1"}),
            &contracts,
        );

        let err = ctx.payload::<Payload>().unwrap_err();

        assert!(matches!(err, TriggerError::InvalidPayload(_)));
    }

    #[test]
    fn missing_contract_names_the_contract() {
        let contracts = ContractSet::new();

        let err = contracts.guild_system().err().unwrap();

        assert_eq!(err, TriggerError::MissingContract("guildSystem"));
        assert_eq!(err.to_string(), "Contrato no configurado: guildSystem");
    }
}
