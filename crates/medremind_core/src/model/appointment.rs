//! Doctor appointment record. Held in memory only.

use crate::model::reminder::{Reminder, ReminderKind, ReminderSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const APPOINTMENT_REMINDER_TITLE: &str = "🗓️Appointment Reminder:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub doctor: String,
    pub specialty: String,
    #[serde(with = "crate::model::iso_millis")]
    pub time: DateTime<Utc>,
    pub location: String,
    pub address: String,
}

impl AppointmentRecord {
    pub fn confirmation_body(&self) -> String {
        format!(
            "Appointment with {} has been scheduled at {}",
            self.doctor, self.location
        )
    }
}

impl ReminderSource for AppointmentRecord {
    fn reminder(&self) -> Option<Reminder> {
        Some(Reminder {
            kind: ReminderKind::Appointment,
            title: APPOINTMENT_REMINDER_TITLE.to_string(),
            body: format!("Appointment with {} at {}", self.doctor, self.location),
            schedule_time: self.time,
        })
    }
}
