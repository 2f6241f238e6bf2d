//! Scheduler for periodic helpdesk maintenance.
//!
//! This module provides a cron-based job scheduler that closes tickets left in RESOLVED and
//! purges old read notifications. Retention windows come from [`Config`].
//!
//! [`Config`]: crate::server::config::Config

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{config::Config, error::Error};

pub mod config;
pub mod notification;
pub mod ticket;

/// Job scheduler for background maintenance tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    auto_close_resolved_after_days: i64,
    notification_retention_days: i64,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, config: &Config) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;

        Ok(Self {
            db,
            auto_close_resolved_after_days: config.auto_close_resolved_after_days,
            notification_retention_days: config.notification_retention_days,
            sched,
        })
    }

    /// Registers all maintenance jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - Auto-close of stale resolved tickets (hourly)
    /// - Cleanup of old read notifications (daily)
    ///
    /// # Returns
    /// - `Ok(JobScheduler)` - Running scheduler, keep it alive for the jobs to keep running
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self) -> Result<JobScheduler, Error> {
        let after_days = self.auto_close_resolved_after_days;
        self.schedule_job(
            config::ticket::AUTO_CLOSE_CRON_EXPRESSION,
            "resolved ticket auto-close",
            move |db| ticket::close_resolved_tickets(db, after_days),
        )
        .await?;

        let retention_days = self.notification_retention_days;
        self.schedule_job(
            config::notification::CLEANUP_CRON_EXPRESSION,
            "read notification cleanup",
            move |db| notification::purge_read_notifications(db, retention_days),
        )
        .await?;

        self.sched.start().await?;

        Ok(self.sched)
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// On execution, the job logs the number of affected records (on success) or the error.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the job should run (e.g., "0 0 * * * *" for hourly)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async function doing the work, returning the number of affected records
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Failed to create or add the job (invalid cron expression or scheduler error)
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<u64, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db).await {
                        Ok(count) => tracing::info!("Ran {}: {} record(s) affected", name, count),
                        Err(e) => tracing::error!("Error running {}: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
