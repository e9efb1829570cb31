//! Backend test support utilities
//!
//! Shared by the backend's integration tests: unified logging initialization
//! and assertions for the problem-details error contract.

pub mod logging;
pub mod problem_details;
