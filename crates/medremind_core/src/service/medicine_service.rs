//! Medicine submit flow.

use crate::clock::{is_same_minute, Clock};
use crate::model::medicine::MEDICINE_REMINDER_TITLE;
use crate::model::reminder::ReminderSource;
use crate::notify::{NotificationBackend, Notifier, ScheduleOutcome};
use crate::repo::kv_repo::KeyValueRepository;
use crate::store::medicine_store::{MedicineStore, StoreResult};
use crate::validation::{MedicineForm, ValidationReport};

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Nothing was stored or scheduled.
    Invalid(ValidationReport),
    Added {
        index: usize,
        /// Outcome of the confirmation notification, when one was requested.
        confirmation: Option<ScheduleOutcome>,
        /// Whether the record was due at the very minute it was added.
        due_now: bool,
    },
}

pub struct MedicineService<C: Clock, B: NotificationBackend> {
    clock: C,
    notifier: Notifier<B>,
}

impl<C: Clock, B: NotificationBackend> MedicineService<C, B> {
    pub fn new(clock: C, notifier: Notifier<B>) -> Self {
        Self { clock, notifier }
    }

    pub fn notifier(&self) -> &Notifier<B> {
        &self.notifier
    }

    /// Validates `form`, schedules the confirmation, and appends the record.
    ///
    /// When the chosen time is the current minute the "time to take"
    /// reminder is sent right away, since the next matcher tick may miss it.
    ///
    /// # Errors
    /// Store errors from the durable write. The record is in memory either way.
    pub fn add_medicine<R: KeyValueRepository>(
        &self,
        store: &mut MedicineStore<R>,
        form: MedicineForm,
    ) -> StoreResult<AddOutcome> {
        let record = match form.into_record() {
            Ok(record) => record,
            Err(report) => return Ok(AddOutcome::Invalid(report)),
        };

        let confirmation = self.notifier.schedule(
            MEDICINE_REMINDER_TITLE,
            &record.confirmation_body(),
            record.schedule_time,
        );

        let due_now = is_same_minute(record.schedule_time, self.clock.now());
        if due_now {
            if let Some(reminder) = record.reminder() {
                self.notifier
                    .schedule(&reminder.title, &reminder.body, reminder.schedule_time);
            }
        }

        let index = store.add(record)?;
        Ok(AddOutcome::Added {
            index,
            confirmation: Some(confirmation),
            due_now,
        })
    }
}
