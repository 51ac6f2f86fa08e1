//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose medicine, reminder and preference use-cases to Dart via FRB.
//! - Hand notification requests back to Dart, which owns the platform scheduler.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Times cross the boundary as epoch milliseconds.
//! - Store indices returned by list calls are valid arguments to `medicine_remove`.

use chrono::{DateTime, Local, Utc};
use medremind_core::config::ENV_DB_PATH;
use medremind_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, load_preferences,
    ping as ping_inner, save_preferences, AddOutcome, MedicineForm, MedicineRecord,
    MedicineService, MedicineStore, NotificationBackend, NotificationPreferences,
    NotificationRequest, Notifier, NotifyError, ReminderCollection, ReminderMatcher,
    SqliteKeyValueRepository, SystemClock,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

const DB_FILE_NAME: &str = "medremind.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Returns `"pong"`; Dart calls this at startup to confirm the library loaded.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Starts the rolling file logger under `log_dir` at `level`.
///
/// Returns an empty string once logging is active, otherwise the reason it
/// is not. A second call must use the same level and directory.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One stored medicine as shown in list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineItem {
    /// Position in the full store; pass back to `medicine_remove`.
    pub index: u32,
    pub name: String,
    pub dosage: String,
    pub schedule_epoch_ms: i64,
}

/// Validation failure for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorItem {
    pub field: String,
    pub message: String,
}

/// Daily notification Dart should hand to the platform scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    pub title: String,
    pub body: String,
    pub hour: u32,
    pub minute: u32,
    pub repeats: bool,
}

/// Action response envelope for medicine commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Store index of the affected medicine, when one was added.
    pub index: Option<u32>,
    /// Per-field validation messages; empty unless the form was rejected.
    pub field_errors: Vec<FieldErrorItem>,
    /// Notifications the caller should schedule.
    pub notifications: Vec<NotificationItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl MedicineActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            index: None,
            field_errors: Vec::new(),
            notifications: Vec::new(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineListResponse {
    pub items: Vec<MedicineItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminderItem {
    /// `medicine|appointment|inventory_dose`.
    pub kind: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPreferencesItem {
    pub medicine_reminders: bool,
    pub appointment_reminders: bool,
    pub low_stock_alerts: bool,
    pub expiry_alerts: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesResponse {
    pub ok: bool,
    pub preferences: NotificationPreferencesItem,
    pub message: String,
}

/// Validates and stores a medicine.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Invalid input returns `ok=false` with `field_errors` and stores nothing.
/// - `notifications` is non-empty only when the medicine was persisted; a
///   failed durable write returns `ok=false` and nothing to schedule.
#[flutter_rust_bridge::frb(sync)]
pub fn medicine_add(
    name: String,
    dosage: String,
    schedule_epoch_ms: i64,
) -> MedicineActionResponse {
    add_medicine_at(&resolve_db_path(), name, dosage, schedule_epoch_ms)
}

fn add_medicine_at(
    db_path: &Path,
    name: String,
    dosage: String,
    schedule_epoch_ms: i64,
) -> MedicineActionResponse {
    let Some(schedule_time) = from_epoch_ms(schedule_epoch_ms) else {
        return MedicineActionResponse::failure(format!(
            "medicine_add failed: schedule_epoch_ms out of range: {schedule_epoch_ms}"
        ));
    };
    let mut store = match open_store(db_path) {
        Ok(store) => store,
        Err(err) => return MedicineActionResponse::failure(format!("medicine_add failed: {err}")),
    };

    let collector = CollectingBackend::default();
    let service = MedicineService::new(SystemClock, Notifier::new(&collector));
    let form = MedicineForm {
        name,
        dosage,
        schedule_time: Some(schedule_time),
    };

    match service.add_medicine(&mut store, form) {
        Ok(AddOutcome::Invalid(report)) => MedicineActionResponse {
            ok: false,
            index: None,
            field_errors: report
                .field_errors()
                .iter()
                .map(|(field, message)| FieldErrorItem {
                    field: (*field).to_string(),
                    message: message.clone(),
                })
                .collect(),
            notifications: Vec::new(),
            message: "Please fix the highlighted fields.".to_string(),
        },
        Ok(AddOutcome::Added { index, .. }) => MedicineActionResponse {
            ok: true,
            index: Some(to_u32(index)),
            field_errors: Vec::new(),
            notifications: collector.take(),
            message: "Medicine added.".to_string(),
        },
        // The store is dropped with this call, so the record is gone too.
        Err(err) => MedicineActionResponse::failure(format!("medicine_add failed: {err}")),
    }
}

/// Lists every stored medicine in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn medicine_list() -> MedicineListResponse {
    list_medicines_at(&resolve_db_path())
}

fn list_medicines_at(db_path: &Path) -> MedicineListResponse {
    match open_store(db_path) {
        Ok(store) => list_response(store.medicines().iter().enumerate().collect()),
        Err(err) => MedicineListResponse {
            items: Vec::new(),
            message: format!("medicine_list failed: {err}"),
        },
    }
}

/// Lists medicines scheduled on the local calendar day containing `epoch_ms`.
///
/// Indices refer to the full store, not the filtered view.
#[flutter_rust_bridge::frb(sync)]
pub fn medicine_list_for_day(epoch_ms: i64) -> MedicineListResponse {
    let Some(at) = from_epoch_ms(epoch_ms) else {
        return MedicineListResponse {
            items: Vec::new(),
            message: format!("medicine_list_for_day failed: epoch_ms out of range: {epoch_ms}"),
        };
    };
    let day = at.with_timezone(&Local).date_naive();
    match open_store(&resolve_db_path()) {
        Ok(store) => list_response(store.medicines_on(day)),
        Err(err) => MedicineListResponse {
            items: Vec::new(),
            message: format!("medicine_list_for_day failed: {err}"),
        },
    }
}

/// Removes the medicine at `index`.
///
/// # FFI contract
/// - Out-of-range indices return `ok=false` and change nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn medicine_remove(index: u32) -> MedicineActionResponse {
    let mut store = match open_store(&resolve_db_path()) {
        Ok(store) => store,
        Err(err) => {
            return MedicineActionResponse::failure(format!("medicine_remove failed: {err}"))
        }
    };
    match store.remove_at(index as usize) {
        Ok(_) => MedicineActionResponse {
            ok: true,
            index: Some(index),
            field_errors: Vec::new(),
            notifications: Vec::new(),
            message: "Medicine removed.".to_string(),
        },
        Err(err) => MedicineActionResponse::failure(format!("medicine_remove failed: {err}")),
    }
}

/// Stored medicines whose reminder falls on the current local minute.
///
/// Disabled preference categories are filtered out.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_due_now() -> Vec<DueReminderItem> {
    let store = match open_store(&resolve_db_path()) {
        Ok(store) => store,
        Err(err) => {
            log::error!("event=reminders_due module=ffi status=error error={err}");
            return Vec::new();
        }
    };
    let preferences = load_preferences(store.repository()).unwrap_or_default();
    let reminders = store.reminders();
    ReminderMatcher::new(SystemClock)
        .due(&reminders)
        .into_iter()
        .filter(|reminder| preferences.allows(reminder.kind))
        .map(|reminder| DueReminderItem {
            kind: reminder.kind.as_str().to_string(),
            title: reminder.title.clone(),
            body: reminder.body.clone(),
        })
        .collect()
}

/// Reads notification preferences; defaults when never saved.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_preferences_get() -> PreferencesResponse {
    let loaded = SqliteKeyValueRepository::open(resolve_db_path())
        .map_err(|err| err.to_string())
        .and_then(|repo| load_preferences(&repo).map_err(|err| err.to_string()));
    match loaded {
        Ok(preferences) => PreferencesResponse {
            ok: true,
            preferences: preferences.into(),
            message: String::new(),
        },
        Err(err) => PreferencesResponse {
            ok: false,
            preferences: NotificationPreferences::default().into(),
            message: format!("notification_preferences_get failed: {err}"),
        },
    }
}

/// Persists notification preferences.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_preferences_set(preferences: NotificationPreferencesItem) -> String {
    let saved = SqliteKeyValueRepository::open(resolve_db_path())
        .map_err(|err| err.to_string())
        .and_then(|repo| {
            save_preferences(&repo, &preferences.into()).map_err(|err| err.to_string())
        });
    match saved {
        Ok(()) => String::new(),
        Err(err) => format!("notification_preferences_set failed: {err}"),
    }
}

impl From<NotificationPreferences> for NotificationPreferencesItem {
    fn from(value: NotificationPreferences) -> Self {
        Self {
            medicine_reminders: value.medicine_reminders,
            appointment_reminders: value.appointment_reminders,
            low_stock_alerts: value.low_stock_alerts,
            expiry_alerts: value.expiry_alerts,
        }
    }
}

impl From<NotificationPreferencesItem> for NotificationPreferences {
    fn from(value: NotificationPreferencesItem) -> Self {
        Self {
            medicine_reminders: value.medicine_reminders,
            appointment_reminders: value.appointment_reminders,
            low_stock_alerts: value.low_stock_alerts,
            expiry_alerts: value.expiry_alerts,
        }
    }
}

/// Grants permission and keeps requests for Dart to post.
#[derive(Default)]
struct CollectingBackend {
    requests: Mutex<Vec<NotificationRequest>>,
}

impl CollectingBackend {
    fn take(&self) -> Vec<NotificationItem> {
        let drained = match self.requests.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        drained
            .into_iter()
            .map(|request| NotificationItem {
                title: request.title,
                body: request.body,
                hour: request.trigger.hour,
                minute: request.trigger.minute,
                repeats: request.trigger.repeats,
            })
            .collect()
    }
}

impl NotificationBackend for CollectingBackend {
    fn request_permission(&self) -> bool {
        true
    }

    fn post(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        self.requests
            .lock()
            .map_err(|_| NotifyError::Backend("request buffer poisoned".to_string()))?
            .push(request.clone());
        Ok(())
    }
}

fn open_store(db_path: &Path) -> Result<MedicineStore<SqliteKeyValueRepository>, String> {
    let repo = SqliteKeyValueRepository::open(db_path)
        .map_err(|err| format!("store open failed: {err}"))?;
    let mut store = MedicineStore::new(repo);
    store
        .load()
        .map_err(|err| format!("store load failed: {err}"))?;
    Ok(store)
}

fn list_response(entries: Vec<(usize, &MedicineRecord)>) -> MedicineListResponse {
    let items: Vec<MedicineItem> = entries
        .into_iter()
        .map(|(index, record)| MedicineItem {
            index: to_u32(index),
            name: record.name.clone(),
            dosage: record.dosage.clone(),
            schedule_epoch_ms: record.schedule_time.timestamp_millis(),
        })
        .collect();
    let message = if items.is_empty() {
        "No medicines.".to_string()
    } else {
        format!("Found {} medicine(s).", items.len())
    };
    MedicineListResponse { items, message }
}

fn from_epoch_ms(epoch_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
}

fn to_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(ENV_DB_PATH) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}
