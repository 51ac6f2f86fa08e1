//! Recurring reminder watcher on a Tokio interval.

use crate::clock::Clock;
use crate::model::reminder::{Reminder, ReminderSource};
use crate::notify::{NotificationBackend, Notifier};
use crate::reminder::matcher::ReminderMatcher;
use crate::repo::kv_repo::KeyValueRepository;
use crate::store::medicine_store::MedicineStore;
use crate::store::preferences::NotificationPreferences;
use crate::store::record_list::RecordList;
use log::{error, info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Bounds applied to the tick interval passed to [`ReminderWatcher::spawn`].
pub const MIN_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// A collection that can project its records onto reminders.
pub trait ReminderCollection {
    fn reminders(&self) -> Vec<Reminder>;
}

impl<R: KeyValueRepository> ReminderCollection for MedicineStore<R> {
    fn reminders(&self) -> Vec<Reminder> {
        self.medicines()
            .iter()
            .filter_map(ReminderSource::reminder)
            .collect()
    }
}

impl<T: ReminderSource> ReminderCollection for RecordList<T> {
    fn reminders(&self) -> Vec<Reminder> {
        self.items()
            .iter()
            .filter_map(ReminderSource::reminder)
            .collect()
    }
}

/// Live view the watcher reads on every tick.
pub trait ReminderFeed: Send + Sync + 'static {
    fn current_reminders(&self) -> Vec<Reminder>;
}

impl<T: ReminderCollection + Send + 'static> ReminderFeed for Arc<Mutex<T>> {
    fn current_reminders(&self) -> Vec<Reminder> {
        match self.lock() {
            Ok(guard) => guard.reminders(),
            Err(poisoned) => {
                warn!("event=reminder_feed module=reminder status=error error_code=lock_poisoned");
                poisoned.into_inner().reminders()
            }
        }
    }
}

/// Handle to a running watcher task.
///
/// Dropping the handle aborts the task.
pub struct ReminderWatcher {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
}

impl ReminderWatcher {
    /// Starts ticking every `interval`; the first tick comes one interval
    /// after spawning.
    ///
    /// `interval` is clamped to `MIN_TICK_INTERVAL..=MAX_TICK_INTERVAL`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F, C, B>(
        feed: F,
        matcher: ReminderMatcher<C>,
        notifier: Notifier<B>,
        preferences: watch::Receiver<NotificationPreferences>,
        interval: Duration,
    ) -> Self
    where
        F: ReminderFeed,
        C: Clock + 'static,
        B: NotificationBackend + 'static,
    {
        let interval = clamp_interval(interval);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks = 0u64;
            info!(
                "event=reminder_watch module=reminder status=start interval_secs={}",
                interval.as_secs()
            );

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        ticks += 1;
                        let reminders = feed.current_reminders();
                        let prefs = *preferences.borrow();
                        matcher.tick(&reminders, &prefs, &notifier);
                    }
                }
            }

            info!("event=reminder_watch module=reminder status=stopped ticks={ticks}");
            ticks
        });

        Self {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the watcher and waits for it; returns the number of ticks run.
    pub async fn shutdown(mut self) -> u64 {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let Some(task) = self.task.take() else {
            return 0;
        };
        match task.await {
            Ok(ticks) => ticks,
            Err(err) => {
                error!("event=reminder_watch module=reminder status=error error={err}");
                0
            }
        }
    }
}

fn clamp_interval(requested: Duration) -> Duration {
    let clamped = requested.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL);
    if clamped != requested {
        warn!(
            "event=reminder_watch module=reminder status=clamped requested_ms={} interval_secs={}",
            requested.as_millis(),
            clamped.as_secs()
        );
    }
    clamped
}

impl Drop for ReminderWatcher {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
