//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod portfolio;
pub mod quests;
pub mod triggers;

// Re-export main types
pub use portfolio::PortfolioRebalancer;
pub use quests::{MonitorResult, QuestMonitor, UserActionEvent};
pub use triggers::{SocialTriggers, TriggerRegistry};
