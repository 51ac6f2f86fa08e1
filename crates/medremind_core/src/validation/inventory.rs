use super::ValidationReport;
use crate::model::inventory::{InventoryItem, InventoryReminder};
use chrono::{DateTime, NaiveDate, Utc};

pub const FIELD_NAME: &str = "name";
pub const FIELD_TOTAL: &str = "total";
pub const FIELD_REMAINING: &str = "remaining";
pub const FIELD_EXPIRY_DATE: &str = "expiryDate";

/// Optional "include reminder" section of the inventory form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryReminderInput {
    pub dosage: String,
    pub schedule_time: DateTime<Utc>,
}

/// Raw input of the "add inventory item" form.
///
/// Quantities arrive as text, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryForm {
    pub name: String,
    pub total: String,
    pub remaining: String,
    pub expiry_date: Option<NaiveDate>,
    pub reminder: Option<InventoryReminderInput>,
}

impl InventoryForm {
    /// Validates against `today`; expiry compares dates only.
    pub fn validate(&self, today: NaiveDate) -> ValidationReport {
        self.check(today).0
    }

    pub fn into_item(self, today: NaiveDate) -> Result<InventoryItem, ValidationReport> {
        let (report, parsed) = self.check(today);
        let (Some(total), Some(remaining), Some(expiry_date)) =
            (parsed.total, parsed.remaining, self.expiry_date)
        else {
            return Err(report);
        };
        if !report.is_valid() {
            return Err(report);
        }

        let reminder = self.reminder.map(|input| InventoryReminder {
            dosage: input.dosage.trim().to_string(),
            schedule_time: input.schedule_time,
        });
        InventoryItem::new(self.name.trim(), remaining, total, expiry_date, reminder).map_err(
            |err| {
                let mut report = ValidationReport::new();
                report.reject(FIELD_REMAINING, err.to_string());
                report
            },
        )
    }

    fn check(&self, today: NaiveDate) -> (ValidationReport, ParsedQuantities) {
        let mut report = ValidationReport::new();
        report.require(FIELD_NAME, &self.name, "Medicine name is required");

        let total = parse_quantity(
            &mut report,
            FIELD_TOTAL,
            &self.total,
            "Total quantity is required",
            "Total must be a valid number",
        );
        let remaining = parse_quantity(
            &mut report,
            FIELD_REMAINING,
            &self.remaining,
            "Remaining quantity is required",
            "Remaining must be a valid number",
        );
        if let (Some(total), Some(remaining)) = (total, remaining) {
            if remaining > total {
                report.reject(FIELD_REMAINING, "Remaining cannot be greater than total");
            }
        }

        match self.expiry_date {
            None => report.reject(FIELD_EXPIRY_DATE, "Expiry date is required"),
            Some(expiry) if expiry < today => {
                report.reject(FIELD_EXPIRY_DATE, "Expiry date cannot be in the past")
            }
            Some(_) => {}
        }

        (report, ParsedQuantities { total, remaining })
    }
}

struct ParsedQuantities {
    total: Option<u32>,
    remaining: Option<u32>,
}

fn parse_quantity(
    report: &mut ValidationReport,
    field: &'static str,
    raw: &str,
    missing: &str,
    malformed: &str,
) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        report.reject(field, missing);
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            report.reject(field, malformed);
            None
        }
    }
}
