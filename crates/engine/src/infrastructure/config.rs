//! Application configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use heroquest_domain::{quest_catalog::DEFAULT_USER, RebalancePolicy, UserId};

use crate::use_cases::portfolio::DEFAULT_REBALANCE_INTERVAL;
use crate::use_cases::quests::DEFAULT_QUEST_CHECK_INTERVAL;
use crate::use_cases::triggers::ContentAmplificationConfig;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How often expired quests are swept
    pub quest_check_interval: Duration,
    /// How often tracked portfolios are analyzed
    pub rebalance_interval: Duration,
    /// Seed the default quests for `default_user_id` at startup
    pub seed_default_user: bool,
    pub default_user_id: UserId,
    /// Users the rebalancer analyzes on every tick
    pub rebalance_users: Vec<UserId>,
    pub amplification: ContentAmplificationConfig,
    pub rebalance_policy: RebalancePolicy,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Missing keys use defaults;
    /// present but unparsable values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_user_id = UserId::new(
            lookup("DEFAULT_USER_ID").unwrap_or_else(|| DEFAULT_USER.to_string()),
        )
        .context("DEFAULT_USER_ID must not be blank")?;

        let rebalance_users = lookup("REBALANCE_USERS")
            .unwrap_or_else(|| default_user_id.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| UserId::new(s).context("REBALANCE_USERS must list valid user ids"))
            .collect::<Result<Vec<_>>>()?;

        let defaults = ContentAmplificationConfig::default();
        let amplification = ContentAmplificationConfig {
            min_reach: parse_or(&lookup, "AMPLIFY_MIN_REACH", defaults.min_reach)?,
            min_engagement: parse_or(&lookup, "AMPLIFY_MIN_ENGAGEMENT", defaults.min_engagement)?,
            reward_multiplier: parse_or(
                &lookup,
                "AMPLIFY_REWARD_MULTIPLIER",
                defaults.reward_multiplier,
            )?,
        };

        let policy_defaults = RebalancePolicy::default();
        let rebalance_policy = RebalancePolicy::new(
            parse_or(
                &lookup,
                "REBALANCE_DRIFT_THRESHOLD",
                policy_defaults.drift_threshold(),
            )?,
            parse_or(
                &lookup,
                "REBALANCE_COMMUNITY_WEIGHT",
                policy_defaults.community_weight(),
            )?,
        )
        .context("Invalid rebalance policy")?;

        Ok(Self {
            quest_check_interval: interval(
                &lookup,
                "QUEST_CHECK_INTERVAL_SECONDS",
                DEFAULT_QUEST_CHECK_INTERVAL,
            )?,
            rebalance_interval: interval(
                &lookup,
                "REBALANCE_INTERVAL_SECONDS",
                DEFAULT_REBALANCE_INTERVAL,
            )?,
            seed_default_user: parse_or(&lookup, "SEED_DEFAULT_USER", true)?,
            default_user_id,
            rebalance_users,
            amplification,
            rebalance_policy,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

fn interval(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration> {
    let secs: u64 = parse_or(lookup, key, default.as_secs())?;
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}
