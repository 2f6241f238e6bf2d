//! Utility functions and helpers for server operations.
//!
//! Role checks shared by the services and date arithmetic used by the scheduled jobs.

pub mod permission;
pub mod time;
