//! Form validators for medicine, appointment and inventory input.
//!
//! # Responsibility
//! - Turn raw form input into field-keyed error messages.
//! - Build trimmed domain records from input that passes validation.
//!
//! # Invariants
//! - Validation is pure: no storage or notification side effects.
//! - A valid report has an empty error map.

mod appointment;
mod inventory;
mod medicine;

pub use appointment::{
    AppointmentForm, FIELD_ADDRESS, FIELD_DOCTOR, FIELD_LOCATION, FIELD_SPECIALTY, FIELD_TIME,
};
pub use inventory::{
    InventoryForm, InventoryReminderInput, FIELD_EXPIRY_DATE, FIELD_REMAINING, FIELD_TOTAL,
};
pub use medicine::{MedicineForm, FIELD_DOSAGE, FIELD_NAME, FIELD_SCHEDULE_TIME};

use std::collections::BTreeMap;

/// Field-keyed validation outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    field_errors: BTreeMap<&'static str, String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Message for `field`, when it failed.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<&'static str, String> {
        &self.field_errors
    }

    /// Drops the error for one field, as when the user edits it.
    pub fn clear_field(&mut self, field: &str) {
        self.field_errors.remove(field);
    }

    pub(crate) fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.field_errors.entry(field).or_insert_with(|| message.into());
    }

    pub(crate) fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.reject(field, message);
        }
    }
}
