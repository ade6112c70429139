//! Common test utilities for creohub-auth-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{MockSessionRepository, MockUserRepository};
