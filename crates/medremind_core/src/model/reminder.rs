//! Canonical reminder shape shared by every record type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which kind of record produced a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Medicine,
    Appointment,
    /// Dose reminder attached to an inventory item.
    InventoryDose,
}

impl ReminderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medicine => "medicine",
            Self::Appointment => "appointment",
            Self::InventoryDose => "inventory_dose",
        }
    }
}

/// Notification-ready projection of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub kind: ReminderKind,
    pub title: String,
    pub body: String,
    pub schedule_time: DateTime<Utc>,
}

/// Implemented by every record that may carry a reminder.
pub trait ReminderSource {
    /// `None` when the record has no reminder attached.
    fn reminder(&self) -> Option<Reminder>;
}
