//! Inventory item with stock and expiry tracking. Held in memory only.

use crate::model::reminder::{Reminder, ReminderKind, ReminderSource};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Items with `remaining` at or below this count are low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 2;

pub const INVENTORY_REMINDER_TITLE: &str = "Medicine Reminder";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    RemainingExceedsTotal { remaining: u32, total: u32 },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RemainingExceedsTotal { remaining, total } => {
                write!(f, "remaining ({remaining}) must be <= total ({total})")
            }
        }
    }
}

impl Error for ModelError {}

/// Optional dose reminder attached to an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReminder {
    pub dosage: String,
    #[serde(rename = "scheduleTime", with = "crate::model::iso_millis")]
    pub schedule_time: DateTime<Utc>,
}

/// Stock invariant `remaining <= total` holds for every constructed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    name: String,
    remaining: u32,
    total: u32,
    #[serde(rename = "expiryDate")]
    expiry_date: NaiveDate,
    reminder: Option<InventoryReminder>,
}

impl InventoryItem {
    pub fn new(
        name: impl Into<String>,
        remaining: u32,
        total: u32,
        expiry_date: NaiveDate,
        reminder: Option<InventoryReminder>,
    ) -> Result<Self, ModelError> {
        if remaining > total {
            return Err(ModelError::RemainingExceedsTotal { remaining, total });
        }
        Ok(Self {
            name: name.into(),
            remaining,
            total,
            expiry_date,
            reminder,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    pub fn attached_reminder(&self) -> Option<&InventoryReminder> {
        self.reminder.as_ref()
    }

    pub fn low_stock(&self) -> bool {
        self.remaining <= LOW_STOCK_THRESHOLD
    }

    /// True when the item expires on or before `today + days`.
    ///
    /// Already-expired items count as expiring.
    pub fn expires_within(&self, today: NaiveDate, days: u64) -> bool {
        match today.checked_add_days(Days::new(days)) {
            Some(horizon) => self.expiry_date <= horizon,
            None => true,
        }
    }
}

impl ReminderSource for InventoryItem {
    fn reminder(&self) -> Option<Reminder> {
        let attached = self.reminder.as_ref()?;
        let dosage = attached.dosage.trim();
        if dosage.is_empty() {
            return None;
        }
        Some(Reminder {
            kind: ReminderKind::InventoryDose,
            title: INVENTORY_REMINDER_TITLE.to_string(),
            body: format!("Time to take {} - {}", self.name, dosage),
            schedule_time: attached.schedule_time,
        })
    }
}
