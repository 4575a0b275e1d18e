//! Backend E2E integration tests.
//!
//! These tests validate full flows through a composed `App` using:
//! - In-memory contract adapters
//! - Real Ed25519 signature verification
//! - Fixed clock and randomness
//!
//! # Running E2E Tests
//!
//! ```bash
//! cargo test -p heroquest-engine --lib e2e_tests
//! ```

mod e2e_helpers;
mod quest_flow_tests;

pub use e2e_helpers::*;
