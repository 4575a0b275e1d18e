//! Social context attached to quests and user actions

use serde::{Deserialize, Serialize};

use crate::GuildId;

/// Social setting a quest is being pursued in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSocialContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collaborators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_bonus: Option<f64>,
}

impl QuestSocialContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn with_collaborators(
        mut self,
        collaborators: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.collaborators = collaborators.into_iter().map(Into::into).collect();
        self
    }
}

/// Social signals that accompany a single user action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSocialContext {
    /// Guild members participating alongside the user.
    #[serde(default)]
    pub guild_members: Vec<String>,
    /// Whether the community vouched for the action.
    #[serde(default)]
    pub community_validation: bool,
}

impl ActionSocialContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guild_members(mut self, members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.guild_members = members.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_community_validation(mut self, validated: bool) -> Self {
        self.community_validation = validated;
        self
    }
}
