mod common;

use chrono::NaiveDate;
use common::local_utc;
use medremind_core::validation::{
    FIELD_ADDRESS, FIELD_DOCTOR, FIELD_EXPIRY_DATE, FIELD_LOCATION, FIELD_NAME, FIELD_REMAINING,
    FIELD_SPECIALTY, FIELD_TIME, FIELD_TOTAL,
};
use medremind_core::{
    AppointmentForm, InventoryForm, InventoryReminderInput, MedicineForm,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

fn inventory_form(total: &str, remaining: &str) -> InventoryForm {
    InventoryForm {
        name: "Ibuprofen".to_string(),
        total: total.to_string(),
        remaining: remaining.to_string(),
        expiry_date: Some(today()),
        reminder: None,
    }
}

#[test]
fn blank_medicine_name_always_fails() {
    for name in ["", "   ", "\t\n"] {
        let report = MedicineForm {
            name: name.to_string(),
            dosage: "1 tablet".to_string(),
            schedule_time: Some(local_utc(2026, 10, 14, 9, 0)),
        }
        .validate();
        assert!(!report.is_valid());
        assert_eq!(report.error(FIELD_NAME), Some("Medicine name is required"));
        assert_eq!(report.field_errors().len(), 1);
    }
}

#[test]
fn complete_medicine_form_is_valid_with_no_errors() {
    let report = MedicineForm {
        name: "Aspirin".to_string(),
        dosage: "1 tablet".to_string(),
        schedule_time: Some(local_utc(2026, 10, 14, 9, 0)),
    }
    .validate();
    assert!(report.is_valid());
    assert!(report.field_errors().is_empty());
}

#[test]
fn appointment_requires_every_field() {
    let report = AppointmentForm::default().validate();
    assert_eq!(report.error(FIELD_DOCTOR), Some("Doctor name is required"));
    assert_eq!(report.error(FIELD_SPECIALTY), Some("Specialty is required"));
    assert_eq!(report.error(FIELD_LOCATION), Some("Location is required"));
    assert_eq!(report.error(FIELD_ADDRESS), Some("Address is required"));
    assert_eq!(report.error(FIELD_TIME), Some("Appointment time is required"));

    let record = AppointmentForm {
        doctor: " Dr. Rivera ".to_string(),
        specialty: "Cardiology".to_string(),
        location: "City Clinic".to_string(),
        address: "1 Main St".to_string(),
        time: Some(local_utc(2026, 10, 20, 14, 15)),
    }
    .into_record()
    .unwrap();
    assert_eq!(record.doctor, "Dr. Rivera");
}

#[test]
fn inventory_quantities_must_be_present_and_numeric() {
    let report = inventory_form("", "").validate(today());
    assert_eq!(report.error(FIELD_TOTAL), Some("Total quantity is required"));
    assert_eq!(
        report.error(FIELD_REMAINING),
        Some("Remaining quantity is required")
    );

    let report = inventory_form("ten", "-1").validate(today());
    assert_eq!(report.error(FIELD_TOTAL), Some("Total must be a valid number"));
    assert_eq!(
        report.error(FIELD_REMAINING),
        Some("Remaining must be a valid number")
    );
}

#[test]
fn remaining_cannot_exceed_total() {
    let report = inventory_form("10", "11").validate(today());
    assert_eq!(
        report.error(FIELD_REMAINING),
        Some("Remaining cannot be greater than total")
    );
    assert!(inventory_form(" 10 ", "10").validate(today()).is_valid());
}

#[test]
fn expiry_date_compares_dates_only() {
    let mut form = inventory_form("10", "5");
    form.expiry_date = today().pred_opt();
    assert_eq!(
        form.validate(today()).error(FIELD_EXPIRY_DATE),
        Some("Expiry date cannot be in the past")
    );

    form.expiry_date = None;
    assert_eq!(
        form.validate(today()).error(FIELD_EXPIRY_DATE),
        Some("Expiry date is required")
    );

    form.expiry_date = Some(today());
    assert!(form.validate(today()).is_valid());
}

#[test]
fn valid_inventory_form_builds_item_with_low_stock_flag() {
    let mut form = inventory_form("10", "1");
    form.reminder = Some(InventoryReminderInput {
        dosage: " 200mg ".to_string(),
        schedule_time: local_utc(2026, 10, 14, 20, 0),
    });
    let item = form.into_item(today()).unwrap();
    assert!(item.low_stock());
    assert_eq!(item.attached_reminder().unwrap().dosage, "200mg");

    let item = inventory_form("10", "3").into_item(today()).unwrap();
    assert!(!item.low_stock());
}

#[test]
fn clearing_an_edited_field_keeps_other_errors() {
    let mut report = MedicineForm::default().validate();
    report.clear_field(FIELD_NAME);
    assert!(report.error(FIELD_NAME).is_none());
    assert!(!report.is_valid());
}
