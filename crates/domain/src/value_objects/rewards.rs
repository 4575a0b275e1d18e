//! Quest rewards and hero stat bonuses

use serde::{Deserialize, Serialize};

/// Rewards paid out when a quest completes.
///
/// Social bonuses adjust these fields in place while the quest is in flight,
/// so the values captured in a completion are the final payout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestRewards {
    pub exp: u32,
    pub coins: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default)]
    pub social_points: u32,
}

impl QuestRewards {
    pub fn new(exp: u32, coins: u32) -> Self {
        Self {
            exp,
            coins,
            items: Vec::new(),
            social_points: 0,
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_social_points(mut self, points: u32) -> Self {
        self.social_points = points;
        self
    }

    /// Scale experience by `1 + bonus`, rounding down.
    pub fn apply_exp_bonus(&mut self, bonus: f64) {
        let scaled = (f64::from(self.exp) * (1.0 + bonus)).floor();
        self.exp = if scaled >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            scaled.max(0.0) as u32
        };
    }

    pub fn add_social_points(&mut self, points: u32) {
        self.social_points = self.social_points.saturating_add(points);
    }
}

/// Attribute increments awarded to the user's hero on quest completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroStatBonus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<u32>,
}

impl HeroStatBonus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attack(mut self, value: u32) -> Self {
        self.attack = Some(value);
        self
    }

    pub fn with_defense(mut self, value: u32) -> Self {
        self.defense = Some(value);
        self
    }

    pub fn with_magic(mut self, value: u32) -> Self {
        self.magic = Some(value);
        self
    }

    pub fn with_social(mut self, value: u32) -> Self {
        self.social = Some(value);
        self
    }

    /// Increase the social stat, treating an absent value as zero.
    pub fn add_social(&mut self, amount: u32) {
        self.social = Some(self.social.unwrap_or(0).saturating_add(amount));
    }
}
