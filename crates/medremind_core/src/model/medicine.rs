//! Medicine record, the only persisted record type.

use crate::model::reminder::{Reminder, ReminderKind, ReminderSource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MEDICINE_REMINDER_TITLE: &str = "💊Medicine Reminder:";

/// One scheduled medicine.
///
/// Non-empty `name`/`dosage` is guaranteed by `MedicineForm`, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineRecord {
    pub name: String,
    /// Free-text amount/form, e.g. `1 tablet`.
    pub dosage: String,
    /// Serialized as `scheduleTime`; the date part is ignored by the matcher.
    #[serde(rename = "scheduleTime", with = "crate::model::iso_millis")]
    pub schedule_time: DateTime<Utc>,
}

impl MedicineRecord {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        schedule_time: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            schedule_time,
        }
    }

    /// Body of the notification sent right after the medicine is added.
    pub fn confirmation_body(&self) -> String {
        format!("{} -{} dosage has been scheduled", self.name, self.dosage)
    }
}

impl ReminderSource for MedicineRecord {
    fn reminder(&self) -> Option<Reminder> {
        Some(Reminder {
            kind: ReminderKind::Medicine,
            title: MEDICINE_REMINDER_TITLE.to_string(),
            body: format!("Time to take {} - {}", self.name, self.dosage),
            schedule_time: self.schedule_time,
        })
    }
}
