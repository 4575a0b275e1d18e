//! E2E test helpers for constructing the full application stack.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use ed25519_dalek::SigningKey;

use heroquest_domain::{ContentId, GuildId, UserId, WalletAddress};

use crate::app::{App, AppPorts};
use crate::infrastructure::clock::{FixedClock, FixedRandom};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::contracts::{
    InMemoryAchievementNft, InMemoryCastProtocol, InMemoryGuildSystem,
};
use crate::infrastructure::portfolio_source::SimulatedPortfolioSource;
use crate::infrastructure::ports::{ContentStats, GuildInfo, GuildMemberInfo};
use crate::infrastructure::signature::test_keys::{address_of, sign_hex, signing_key};
use crate::infrastructure::signature::Ed25519SignatureVerifier;
use crate::use_cases::triggers::{ContentAmplificationPayload, ContractSet};

pub const GUILD: &str = "avalanche-heroes";
pub const VIRAL_CONTENT: &str = "cast-viral";
pub const TREASURY: u64 = 50_000;

pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn default_user() -> UserId {
    UserId::new("default-user").unwrap()
}

pub fn guild_id() -> GuildId {
    GuildId::new(GUILD).unwrap()
}

/// A fully wired app plus handles on its in-memory contracts.
pub struct TestApp {
    pub app: App,
    pub guilds: Arc<InMemoryGuildSystem>,
    pub cast: Arc<InMemoryCastProtocol>,
    pub nft: Arc<InMemoryAchievementNft>,
    pub hero_key: SigningKey,
}

impl TestApp {
    /// Default config, one guild with an active, well-contributing hero, and
    /// one viral piece of content.
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock(test_now()));
        let random = Arc::new(FixedRandom::new(10_000, 0.5));
        let hero_key = signing_key(11);
        let hero = address_of(&hero_key);

        let guilds = Arc::new(
            InMemoryGuildSystem::new(clock.clone())
                .with_guild(
                    guild_id(),
                    GuildInfo {
                        name: "Avalanche Heroes".into(),
                        member_count: 150,
                        treasury_balance: TREASURY,
                        total_social_score: 0,
                    },
                )
                .with_member(
                    guild_id(),
                    hero,
                    GuildMemberInfo {
                        is_active: true,
                        reputation: 1_200,
                        contribution: 20_000,
                        last_reward_at: Some(test_now() - Duration::days(2)),
                    },
                ),
        );
        let cast = Arc::new(InMemoryCastProtocol::new().with_content(
            ContentId::new(VIRAL_CONTENT).unwrap(),
            ContentStats {
                reach: 250_000,
                engagement: 9_000,
                amplifications: 0,
            },
        ));
        let nft = Arc::new(InMemoryAchievementNft::new());

        let contracts = ContractSet::new()
            .with_guild_system(guilds.clone())
            .with_cast_protocol(cast.clone())
            .with_achievement_nft(nft.clone());

        let config = AppConfig::from_lookup(|_| None).expect("defaults are valid");
        let app = App::new(
            config,
            AppPorts {
                contracts,
                clock: clock.clone(),
                random: random.clone(),
                verifier: Arc::new(Ed25519SignatureVerifier::new()),
                portfolio_source: Arc::new(SimulatedPortfolioSource::new(random, clock)),
            },
        );

        Self {
            app,
            guilds,
            cast,
            nft,
            hero_key,
        }
    }

    pub fn hero(&self) -> WalletAddress {
        address_of(&self.hero_key)
    }

    pub fn treasury(&self) -> u64 {
        self.guilds
            .guild(&guild_id())
            .map(|g| g.treasury_balance)
            .unwrap_or_default()
    }

    /// A content-amplification payload signed by the hero `age_secs` ago.
    pub fn signed_proof(&self, reach: u64, engagement: u64, age_secs: i64) -> serde_json::Value {
        let mut payload = ContentAmplificationPayload {
            content_id: ContentId::new("cast-1").unwrap(),
            platform: "farcaster".into(),
            reach,
            engagement,
            timestamp: test_now().timestamp() - age_secs,
            signature: String::new(),
            guild_id: guild_id(),
        };
        payload.signature = sign_hex(&self.hero_key, &payload.proof_message());
        serde_json::to_value(payload).expect("payload serializes")
    }
}
