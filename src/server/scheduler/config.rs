//! Cron expressions of the maintenance jobs.
//!
//! Expressions use tokio-cron-scheduler's six-field format, seconds first.

pub mod ticket {
    /// Close stale resolved tickets every hour on the hour
    pub const AUTO_CLOSE_CRON_EXPRESSION: &str = "0 0 * * * *";
}

pub mod notification {
    /// Purge old read notifications daily at 03:30 UTC, outside working hours
    pub const CLEANUP_CRON_EXPRESSION: &str = "0 30 3 * * *";
}
