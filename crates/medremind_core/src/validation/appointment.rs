use super::ValidationReport;
use crate::model::appointment::AppointmentRecord;
use chrono::{DateTime, Utc};

pub const FIELD_DOCTOR: &str = "doctor";
pub const FIELD_SPECIALTY: &str = "specialty";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_ADDRESS: &str = "address";
pub const FIELD_TIME: &str = "time";

/// Raw input of the "add appointment" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub doctor: String,
    pub specialty: String,
    pub location: String,
    pub address: String,
    pub time: Option<DateTime<Utc>>,
}

impl AppointmentForm {
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.require(FIELD_DOCTOR, &self.doctor, "Doctor name is required");
        report.require(FIELD_SPECIALTY, &self.specialty, "Specialty is required");
        report.require(FIELD_LOCATION, &self.location, "Location is required");
        report.require(FIELD_ADDRESS, &self.address, "Address is required");
        if self.time.is_none() {
            report.reject(FIELD_TIME, "Appointment time is required");
        }
        report
    }

    pub fn into_record(self) -> Result<AppointmentRecord, ValidationReport> {
        let report = self.validate();
        match self.time {
            Some(time) if report.is_valid() => Ok(AppointmentRecord {
                doctor: self.doctor.trim().to_string(),
                specialty: self.specialty.trim().to_string(),
                time,
                location: self.location.trim().to_string(),
                address: self.address.trim().to_string(),
            }),
            _ => Err(report),
        }
    }
}
