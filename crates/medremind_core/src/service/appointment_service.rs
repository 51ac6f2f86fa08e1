//! Appointment submit flow.

use crate::model::appointment::{AppointmentRecord, APPOINTMENT_REMINDER_TITLE};
use crate::notify::{NotificationBackend, Notifier};
use crate::service::medicine_service::AddOutcome;
use crate::store::record_list::RecordList;
use crate::validation::AppointmentForm;

pub struct AppointmentService<B: NotificationBackend> {
    notifier: Notifier<B>,
}

impl<B: NotificationBackend> AppointmentService<B> {
    pub fn new(notifier: Notifier<B>) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &Notifier<B> {
        &self.notifier
    }

    /// Validates `form`, schedules the confirmation, and appends the appointment.
    pub fn add_appointment(
        &self,
        appointments: &mut RecordList<AppointmentRecord>,
        form: AppointmentForm,
    ) -> AddOutcome {
        let record = match form.into_record() {
            Ok(record) => record,
            Err(report) => return AddOutcome::Invalid(report),
        };
        let confirmation = self.notifier.schedule(
            APPOINTMENT_REMINDER_TITLE,
            &record.confirmation_body(),
            record.time,
        );
        let index = appointments.push(record);
        AddOutcome::Added {
            index,
            confirmation: Some(confirmation),
            due_now: false,
        }
    }
}
