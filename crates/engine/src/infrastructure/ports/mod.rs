//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Contract clients (guild system, cast protocol, achievement NFT)
//! - Signature verification (could swap Ed25519 -> secp256k1 wallets)
//! - Portfolio data (could swap simulation -> indexer)
//! - Clock/Random (for testing)

mod contracts;
mod error;
mod external;
mod testing;

pub use contracts::{
    AchievementNftPort, CastProtocolPort, ContentStats, GuildInfo, GuildMemberInfo,
    GuildSystemPort, TxReceipt,
};
pub use error::{ContractError, PortfolioError, SignatureError};
pub use external::{PortfolioDataPort, SignatureVerifierPort};
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use contracts::{MockAchievementNftPort, MockCastProtocolPort, MockGuildSystemPort};
#[cfg(test)]
pub use external::{MockPortfolioDataPort, MockSignatureVerifierPort};
#[cfg(test)]
pub use testing::MockClockPort;
