//! Per-user active quest storage.

use dashmap::DashMap;

use heroquest_domain::{quest_catalog, QuestProgress, UserId};

/// Active quests keyed by user.
///
/// The store is the single owner of quest progress. Updates for one user run
/// under that user's entry lock, so concurrent updates for the same user are
/// serialized while different users proceed independently.
#[derive(Debug, Default)]
pub struct QuestProgressStore {
    quests: DashMap<UserId, Vec<QuestProgress>>,
}

impl QuestProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user's active quests.
    pub fn initialize_user(&self, user_id: UserId, quests: Vec<QuestProgress>) {
        tracing::debug!(user_id = %user_id, count = quests.len(), "Initialized user quests");
        self.quests.insert(user_id, quests);
    }

    /// Give `user_id` the default quest set.
    pub fn seed_default_user(&self, user_id: &UserId) {
        self.initialize_user(user_id.clone(), quest_catalog::default_quests(user_id));
    }

    /// Snapshot of the user's active quests. Empty for unknown users.
    pub fn active_quests(&self, user_id: &UserId) -> Vec<QuestProgress> {
        self.quests
            .get(user_id)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    pub fn has_user(&self, user_id: &UserId) -> bool {
        self.quests.contains_key(user_id)
    }

    /// Run `f` over the user's quest list while holding the entry lock.
    ///
    /// Returns `None` without creating an entry when the user is unknown.
    pub fn update<R>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut Vec<QuestProgress>) -> R,
    ) -> Option<R> {
        self.quests.get_mut(user_id).map(|mut entry| f(entry.value_mut()))
    }

    /// Remove every quest `is_expired` reports, returning what was removed.
    pub fn remove_where(
        &self,
        mut is_expired: impl FnMut(&QuestProgress) -> bool,
    ) -> Vec<QuestProgress> {
        let mut removed = Vec::new();
        for mut entry in self.quests.iter_mut() {
            let (gone, kept): (Vec<_>, Vec<_>) =
                std::mem::take(entry.value_mut())
                    .into_iter()
                    .partition(|quest| is_expired(quest));
            *entry.value_mut() = kept;
            removed.extend(gone);
        }
        removed
    }
}
