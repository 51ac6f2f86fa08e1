//! Notification preference toggles, persisted beside the medicines.

use crate::model::reminder::ReminderKind;
use crate::repo::kv_repo::KeyValueRepository;
use crate::store::medicine_store::{StoreError, StoreResult};
use log::{error, info};
use serde::{Deserialize, Serialize};

pub const PREFERENCES_KEY: &str = "notification_preferences";

/// Per-category notification switches. Everything is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub medicine_reminders: bool,
    pub appointment_reminders: bool,
    pub low_stock_alerts: bool,
    pub expiry_alerts: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            medicine_reminders: true,
            appointment_reminders: true,
            low_stock_alerts: true,
            expiry_alerts: true,
        }
    }
}

impl NotificationPreferences {
    /// Whether reminders of `kind` may be delivered.
    pub fn allows(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::Medicine | ReminderKind::InventoryDose => self.medicine_reminders,
            ReminderKind::Appointment => self.appointment_reminders,
        }
    }
}

/// Reads preferences, returning defaults when never saved.
pub fn load_preferences(repo: &impl KeyValueRepository) -> StoreResult<NotificationPreferences> {
    let stored = repo.get_value(PREFERENCES_KEY).map_err(|err| {
        error!("event=preferences_load module=store status=error error_code=read_failed error={err}");
        StoreError::Read(err)
    })?;
    match stored {
        None => Ok(NotificationPreferences::default()),
        Some(raw) => serde_json::from_str(&raw).map_err(|err| {
            error!("event=preferences_load module=store status=error error_code=decode_failed error={err}");
            StoreError::Decode(err)
        }),
    }
}

pub fn save_preferences(
    repo: &impl KeyValueRepository,
    preferences: &NotificationPreferences,
) -> StoreResult<()> {
    let encoded = serde_json::to_string(preferences).map_err(StoreError::Encode)?;
    repo.set_value(PREFERENCES_KEY, &encoded).map_err(|err| {
        error!("event=preferences_save module=store status=error error_code=write_failed error={err}");
        StoreError::Write(err)
    })?;
    info!("event=preferences_save module=store status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::NotificationPreferences;
    use crate::model::reminder::ReminderKind;

    #[test]
    fn partial_json_falls_back_to_defaults_per_field() {
        let prefs: NotificationPreferences =
            serde_json::from_str(r#"{"appointmentReminders":false}"#).unwrap();
        assert!(prefs.medicine_reminders);
        assert!(!prefs.appointment_reminders);
        assert!(prefs.expiry_alerts);
    }

    #[test]
    fn inventory_doses_follow_the_medicine_switch() {
        let prefs = NotificationPreferences {
            medicine_reminders: false,
            ..NotificationPreferences::default()
        };
        assert!(!prefs.allows(ReminderKind::InventoryDose));
        assert!(!prefs.allows(ReminderKind::Medicine));
        assert!(prefs.allows(ReminderKind::Appointment));
    }
}
