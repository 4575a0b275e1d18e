//! HeroQuest Engine library.
//!
//! This crate contains the server-side core of DeFi Hero Quest.
//!
//! ## Structure
//!
//! - `use_cases/` - Triggers, quest monitoring and portfolio rebalancing
//! - `stores/` - In-memory runtime state
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// End-to-end tests over the composed application.
#[cfg(test)]
mod e2e_tests;

pub use app::{App, AppPorts};
