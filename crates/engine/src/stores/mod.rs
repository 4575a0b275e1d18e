//! In-memory state storage modules.
//!
//! Stores manage runtime state owned by the engine:
//! - `QuestProgressStore` - Active quests per user

pub mod quest_progress;

// Re-export store types
pub use quest_progress::QuestProgressStore;
