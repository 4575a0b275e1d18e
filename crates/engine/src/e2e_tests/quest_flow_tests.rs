//! Quest monitoring flows over the seeded default user.

use heroquest_domain::quest_catalog::{GUILD_STAKING_MASTER, SOCIAL_YIELD_FARMER_TRIAL};
use heroquest_domain::HeroStatBonus;

use super::{default_user, TestApp};
use crate::use_cases::UserActionEvent;

fn progress(test: &TestApp, quest_id: &str) -> Option<u32> {
    test.app
        .quest_store
        .active_quests(&default_user())
        .into_iter()
        .find(|q| q.quest_id.as_str() == quest_id)
        .map(|q| q.progress())
}

#[test]
fn first_stake_advances_trial_only() {
    let test = TestApp::new();
    let monitor = &test.app.use_cases.quest_monitor;

    let result = monitor.monitor_user_action(UserActionEvent::new(default_user(), "stake"));

    assert!(result.completed_quests.is_empty());
    assert_eq!(progress(&test, SOCIAL_YIELD_FARMER_TRIAL), Some(1));
    assert_eq!(progress(&test, GUILD_STAKING_MASTER), Some(0));
}

#[test]
fn trial_completes_after_stake_liquidity_and_farm() {
    let test = TestApp::new();
    let monitor = &test.app.use_cases.quest_monitor;

    monitor.monitor_user_action(UserActionEvent::new(default_user(), "stake"));
    let after_liquidity =
        monitor.monitor_user_action(UserActionEvent::new(default_user(), "liquidity"));
    assert!(after_liquidity.completed_quests.is_empty());
    assert_eq!(progress(&test, SOCIAL_YIELD_FARMER_TRIAL), Some(2));

    let result = monitor.monitor_user_action(UserActionEvent::new(default_user(), "yield-farm"));

    assert_eq!(result.completed_quests.len(), 1);
    let completion = &result.completed_quests[0];
    assert_eq!(completion.quest_id.as_str(), SOCIAL_YIELD_FARMER_TRIAL);
    assert_eq!(completion.rewards.exp, 500);
    assert_eq!(completion.rewards.coins, 1_000);
    assert_eq!(completion.rewards.social_points, 100);
    assert_eq!(progress(&test, SOCIAL_YIELD_FARMER_TRIAL), None);

    // A further farm action no longer touches the completed quest.
    let again = monitor.monitor_user_action(UserActionEvent::new(default_user(), "yield-farm"));
    assert!(again.completed_quests.is_empty());
}

#[test]
fn five_large_stakes_complete_guild_staking_master() {
    let test = TestApp::new();
    let monitor = &test.app.use_cases.quest_monitor;

    let results: Vec<_> = (0..5)
        .map(|_| {
            monitor.monitor_user_action(
                UserActionEvent::new(default_user(), "stake").with_amount(150.0),
            )
        })
        .collect();

    assert!(results[..4].iter().all(|r| r.completed_quests.is_empty()));
    let last = &results[4];
    assert_eq!(last.completed_quests.len(), 1);
    let completion = &last.completed_quests[0];
    assert_eq!(completion.quest_id.as_str(), GUILD_STAKING_MASTER);
    assert_eq!(
        completion.hero_stat_bonus,
        HeroStatBonus::new()
            .with_defense(5)
            .with_attack(2)
            .with_social(3)
    );
    assert_eq!(progress(&test, GUILD_STAKING_MASTER), None);
}

#[test]
fn small_stakes_do_not_count_toward_guild_staking() {
    let test = TestApp::new();
    let monitor = &test.app.use_cases.quest_monitor;

    for _ in 0..3 {
        monitor.monitor_user_action(UserActionEvent::new(default_user(), "stake").with_amount(99.0));
    }

    assert_eq!(progress(&test, GUILD_STAKING_MASTER), Some(0));
}
