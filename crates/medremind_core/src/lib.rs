//! Core domain logic for medremind.
//! This crate is the single source of truth for reminder and storage invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod reminder;
pub mod repo;
pub mod service;
pub mod store;
pub mod validation;

pub use clock::{is_same_minute, Clock, ManualClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::AppointmentRecord;
pub use model::inventory::{InventoryItem, InventoryReminder, ModelError, LOW_STOCK_THRESHOLD};
pub use model::medicine::MedicineRecord;
pub use model::reminder::{Reminder, ReminderKind, ReminderSource};
pub use notify::{
    DailyTrigger, LogNotificationBackend, NotificationBackend, NotificationRequest, Notifier,
    NotifyError, ScheduleOutcome,
};
pub use reminder::matcher::{MatcherState, ReminderMatcher, TickReport};
pub use reminder::watcher::{ReminderCollection, ReminderFeed, ReminderWatcher};
pub use repo::kv_repo::{KeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository};
pub use service::appointment_service::AppointmentService;
pub use service::inventory_service::{InventoryAlert, InventoryService, InventoryStats};
pub use service::medicine_service::{AddOutcome, MedicineService};
pub use store::medicine_store::{MedicineStore, StoreError, StoreResult, MEDICINES_KEY};
pub use store::preferences::{load_preferences, save_preferences, NotificationPreferences};
pub use store::record_list::RecordList;
pub use validation::{
    AppointmentForm, InventoryForm, InventoryReminderInput, MedicineForm, ValidationReport,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
