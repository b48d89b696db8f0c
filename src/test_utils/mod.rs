//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory repository implementations for mocking persistence
//! - Stub classifiers
//! - A builder for constructing `AppState` with test dependencies

mod app_state_builder;
mod factories;
mod token_mocks;
mod usage_mocks;

pub use app_state_builder::*;
pub use classifier_stubs::*;
pub use factories::*;
pub use token_mocks::*;
pub use usage_mocks::*;
