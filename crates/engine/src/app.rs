//! Application state and composition.

use std::sync::Arc;

use heroquest_domain::{TriggerResult, WalletAddress};

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::AppConfig,
    contracts::{InMemoryAchievementNft, InMemoryCastProtocol, InMemoryGuildSystem},
    portfolio_source::SimulatedPortfolioSource,
    ports::{ClockPort, PortfolioDataPort, RandomPort, SignatureVerifierPort},
    scheduler::Scheduler,
    signature::Ed25519SignatureVerifier,
};
use crate::stores::QuestProgressStore;
use crate::use_cases::triggers::{ContractSet, TriggerContext};
use crate::use_cases::{PortfolioRebalancer, QuestMonitor, SocialTriggers, TriggerRegistry};

/// External collaborators the application is built from.
pub struct AppPorts {
    pub contracts: ContractSet,
    pub clock: Arc<dyn ClockPort>,
    pub random: Arc<dyn RandomPort>,
    pub verifier: Arc<dyn SignatureVerifierPort>,
    pub portfolio_source: Arc<dyn PortfolioDataPort>,
}

impl AppPorts {
    /// In-memory contracts, real time and randomness, simulated portfolios.
    pub fn in_memory() -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());

        let contracts = ContractSet::new()
            .with_guild_system(Arc::new(InMemoryGuildSystem::new(clock.clone())))
            .with_cast_protocol(Arc::new(InMemoryCastProtocol::new()))
            .with_achievement_nft(Arc::new(InMemoryAchievementNft::new()));

        Self {
            contracts,
            portfolio_source: Arc::new(SimulatedPortfolioSource::new(
                random.clone(),
                clock.clone(),
            )),
            verifier: Arc::new(Ed25519SignatureVerifier::new()),
            clock,
            random,
        }
    }
}

/// Main application state.
///
/// Holds the contract set, the quest store and all use cases.
pub struct App {
    pub config: AppConfig,
    pub contracts: ContractSet,
    pub quest_store: Arc<QuestProgressStore>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub social_triggers: SocialTriggers,
    pub triggers: TriggerRegistry,
    pub quest_monitor: Arc<QuestMonitor>,
    pub portfolio: Arc<PortfolioRebalancer>,
}

impl App {
    pub fn new(config: AppConfig, ports: AppPorts) -> Self {
        let quest_store = Arc::new(QuestProgressStore::new());
        if config.seed_default_user {
            quest_store.seed_default_user(&config.default_user_id);
            tracing::info!(user_id = %config.default_user_id, "Seeded default quests");
        }

        let social_triggers = SocialTriggers::new(
            config.amplification.clone(),
            ports.verifier,
            ports.clock.clone(),
        );
        let triggers = social_triggers.registry();

        let quest_monitor = Arc::new(QuestMonitor::new(
            quest_store.clone(),
            ports.clock.clone(),
            ports.random,
        ));
        let portfolio = Arc::new(PortfolioRebalancer::new(
            ports.portfolio_source,
            config.rebalance_policy,
            ports.clock,
            config.rebalance_users.clone(),
        ));

        Self {
            config,
            contracts: ports.contracts,
            quest_store,
            use_cases: UseCases {
                social_triggers,
                triggers,
                quest_monitor,
                portfolio,
            },
        }
    }

    /// Run a registered trigger against the application's contracts.
    pub async fn execute_trigger(
        &self,
        name: &str,
        sender: WalletAddress,
        data: serde_json::Value,
    ) -> TriggerResult {
        let ctx = TriggerContext::new(sender, data, &self.contracts);
        self.use_cases.triggers.execute(name, &ctx).await
    }

    /// Scheduler with the quest sweep and the portfolio analysis registered.
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new()
            .every(
                self.config.quest_check_interval,
                self.use_cases.quest_monitor.clone(),
            )
            .every(
                self.config.rebalance_interval,
                self.use_cases.portfolio.clone(),
            )
    }
}
