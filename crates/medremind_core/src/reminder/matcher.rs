//! To-the-minute reminder matcher.

use crate::clock::{is_same_minute, Clock};
use crate::model::reminder::Reminder;
use crate::notify::{NotificationBackend, Notifier, ScheduleOutcome};
use crate::store::preferences::NotificationPreferences;
use chrono::{DateTime, Local};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherState {
    /// Nothing to watch.
    Idle,
    /// At least one reminder exists.
    Watching,
}

/// Result of one matcher tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub state: MatcherState,
    /// Reminders matching the current minute.
    pub due: usize,
    /// Due reminders the notifier accepted.
    pub scheduled: usize,
    /// Due reminders skipped by notification preferences.
    pub suppressed: usize,
}

pub struct ReminderMatcher<C: Clock> {
    clock: C,
}

impl<C: Clock> ReminderMatcher<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    pub fn state(&self, reminders: &[Reminder]) -> MatcherState {
        if reminders.is_empty() {
            MatcherState::Idle
        } else {
            MatcherState::Watching
        }
    }

    /// Reminders due at the clock's current minute, in input order.
    pub fn due<'a>(&self, reminders: &'a [Reminder]) -> Vec<&'a Reminder> {
        let now = self.clock.now();
        reminders
            .iter()
            .filter(|reminder| is_same_minute(reminder.schedule_time, now))
            .collect()
    }

    /// Runs one matching pass and hands due reminders to `notifier`.
    pub fn tick<B: NotificationBackend>(
        &self,
        reminders: &[Reminder],
        preferences: &NotificationPreferences,
        notifier: &Notifier<B>,
    ) -> TickReport {
        let state = self.state(reminders);
        let mut report = TickReport {
            state,
            due: 0,
            scheduled: 0,
            suppressed: 0,
        };
        if state == MatcherState::Idle {
            return report;
        }

        for reminder in self.due(reminders) {
            report.due += 1;
            if !preferences.allows(reminder.kind) {
                report.suppressed += 1;
                debug!(
                    "event=reminder_match module=reminder status=skipped reason=preference_off kind={}",
                    reminder.kind.as_str()
                );
                continue;
            }
            let outcome =
                notifier.schedule(&reminder.title, &reminder.body, reminder.schedule_time);
            if outcome == ScheduleOutcome::Scheduled {
                report.scheduled += 1;
            }
        }

        debug!(
            "event=reminder_tick module=reminder status=ok watched={} due={} scheduled={} suppressed={}",
            reminders.len(),
            report.due,
            report.scheduled,
            report.suppressed
        );
        report
    }
}
