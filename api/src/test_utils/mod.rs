//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! The in-memory adapters double as fakes for the repository ports; only the
//! upstream clients need mocks.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
