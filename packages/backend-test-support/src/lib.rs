//! Backend test support utilities
//!
//! Shared helpers for the yacht backend test suites: unified logging
//! initialization and Problem Details assertions.

pub mod logging;
pub mod problem_details;
