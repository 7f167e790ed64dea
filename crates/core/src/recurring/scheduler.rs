//! Daily trigger for the recurring expense processor.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::processor::RecurringExpenseProcessor;
use super::store::RecurringExpenseStore;

/// Default run time: 01:00 local time.
pub const DEFAULT_RUN_AT: NaiveTime = match NaiveTime::from_hms_opt(1, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// A once-per-day schedule at a fixed local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    run_at: NaiveTime,
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self::new(DEFAULT_RUN_AT)
    }
}

impl DailySchedule {
    /// Creates a schedule that fires daily at `run_at`.
    #[must_use]
    pub const fn new(run_at: NaiveTime) -> Self {
        Self { run_at }
    }

    /// Returns the configured run time.
    #[must_use]
    pub const fn run_at(&self) -> NaiveTime {
        self.run_at
    }

    /// Returns the first run strictly after `now`.
    #[must_use]
    pub fn next_run_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.run_at);
        if today > now {
            return today;
        }
        now.date()
            .succ_opt()
            .map_or(NaiveDateTime::MAX, |tomorrow| tomorrow.and_time(self.run_at))
    }

    /// Returns how long to wait from `now` until the next run.
    #[must_use]
    pub fn delay_until_next(&self, now: NaiveDateTime) -> Duration {
        (self.next_run_after(now) - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Spawns a background task that runs a pass once per day.
///
/// Each pass uses the local calendar date at wake-up as its reference date.
/// The task runs until the runtime shuts down or the handle is aborted.
pub fn spawn_daily<R>(
    processor: Arc<RecurringExpenseProcessor<R>>,
    schedule: DailySchedule,
) -> JoinHandle<()>
where
    R: RecurringExpenseStore + 'static,
{
    tokio::spawn(async move {
        info!(run_at = %schedule.run_at(), "Recurring expense scheduler started");

        loop {
            let delay = schedule.delay_until_next(Local::now().naive_local());
            debug!(delay_secs = delay.as_secs(), "Waiting for next recurring expense pass");
            tokio::time::sleep(delay).await;

            let today = Local::now().date_naive();
            if let Err(e) = processor.run(today).await {
                error!(error = %e, reference_date = %today, "Scheduled recurring expense pass failed");
            }
        }
    })
}
