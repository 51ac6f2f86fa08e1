use super::ValidationReport;
use crate::model::medicine::MedicineRecord;
use chrono::{DateTime, Utc};

pub const FIELD_NAME: &str = "name";
pub const FIELD_DOSAGE: &str = "dosage";
pub const FIELD_SCHEDULE_TIME: &str = "scheduleTime";

/// Raw input of the "add medicine" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineForm {
    pub name: String,
    pub dosage: String,
    pub schedule_time: Option<DateTime<Utc>>,
}

impl MedicineForm {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require(FIELD_NAME, &self.name, "Medicine name is required");
        report.require(FIELD_DOSAGE, &self.dosage, "Dosage is required");
        if self.schedule_time.is_none() {
            report.reject(FIELD_SCHEDULE_TIME, "Schedule time is required");
        }
        report
    }

    /// Builds a trimmed record, or returns the failing report.
    pub fn into_record(self) -> Result<MedicineRecord, ValidationReport> {
        let report = self.validate();
        match self.schedule_time {
            Some(schedule_time) if report.is_valid() => Ok(MedicineRecord::new(
                self.name.trim(),
                self.dosage.trim(),
                schedule_time,
            )),
            _ => Err(report),
        }
    }
}
