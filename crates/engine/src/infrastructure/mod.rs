//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies, plus the
//! scheduler and configuration loading.

pub mod clock;
pub mod config;
pub mod contracts;
pub mod portfolio_source;
pub mod ports;
pub mod scheduler;
pub mod signature;
