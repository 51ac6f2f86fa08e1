mod common;

use common::{local, local_utc, RecordingBackend};
use medremind_core::{
    AppointmentRecord, InventoryItem, InventoryReminder, ManualClock, MatcherState,
    MedicineRecord, NotificationPreferences, Notifier, RecordList, Reminder, ReminderCollection,
    ReminderKind, ReminderMatcher, ReminderSource,
};

fn medicine_reminder(hour: u32, minute: u32) -> Reminder {
    MedicineRecord::new("Aspirin", "1 tablet", local_utc(2026, 10, 14, hour, minute))
        .reminder()
        .unwrap()
}

#[test]
fn fires_only_on_exact_hour_and_minute() {
    let reminders = vec![medicine_reminder(9, 0)];
    let clock = ManualClock::new(local(2026, 10, 14, 9, 0));
    let matcher = ReminderMatcher::new(&clock);

    assert_eq!(matcher.due(&reminders).len(), 1);

    for (hour, minute) in [(9, 1), (8, 59), (10, 0), (21, 0), (0, 0)] {
        clock.set(local(2026, 10, 14, hour, minute));
        assert!(
            matcher.due(&reminders).is_empty(),
            "unexpected match at {hour:02}:{minute:02}"
        );
    }
}

#[test]
fn schedule_date_is_ignored() {
    let reminders = vec![MedicineRecord::new("Aspirin", "1 tablet", local_utc(2025, 1, 2, 9, 0))
        .reminder()
        .unwrap()];
    let matcher = ReminderMatcher::new(ManualClock::new(local(2026, 10, 14, 9, 0)));
    assert_eq!(matcher.due(&reminders).len(), 1);
}

#[test]
fn empty_collection_is_idle_and_schedules_nothing() {
    let backend = RecordingBackend::granting();
    let notifier = Notifier::new(&backend);
    let matcher = ReminderMatcher::new(ManualClock::new(local(2026, 10, 14, 9, 0)));

    let report = matcher.tick(&[], &NotificationPreferences::default(), &notifier);
    assert_eq!(report.state, MatcherState::Idle);
    assert_eq!(report.due, 0);
    assert!(backend.posted().is_empty());
}

#[test]
fn aspirin_at_nine_notifies_once_with_name_and_dosage() {
    let backend = RecordingBackend::granting();
    let notifier = Notifier::new(&backend);
    let matcher = ReminderMatcher::new(ManualClock::new(local(2026, 10, 14, 9, 0)));
    let reminders = vec![medicine_reminder(9, 0), medicine_reminder(13, 30)];

    let report = matcher.tick(&reminders, &NotificationPreferences::default(), &notifier);

    assert_eq!(report.state, MatcherState::Watching);
    assert_eq!(report.due, 1);
    assert_eq!(report.scheduled, 1);
    let posted = backend.posted();
    assert_eq!(posted.len(), 1);
    assert!(posted[0].body.contains("Aspirin"));
    assert!(posted[0].body.contains("1 tablet"));
    assert_eq!((posted[0].trigger.hour, posted[0].trigger.minute), (9, 0));
}

#[test]
fn two_ticks_in_the_same_minute_fire_twice() {
    let backend = RecordingBackend::granting();
    let notifier = Notifier::new(&backend);
    let matcher = ReminderMatcher::new(ManualClock::new(local(2026, 10, 14, 9, 0)));
    let reminders = vec![medicine_reminder(9, 0)];
    let prefs = NotificationPreferences::default();

    matcher.tick(&reminders, &prefs, &notifier);
    matcher.tick(&reminders, &prefs, &notifier);
    assert_eq!(backend.posted().len(), 2);
}

#[test]
fn permission_denied_matches_but_schedules_nothing() {
    let backend = RecordingBackend::denying();
    let notifier = Notifier::new(&backend);
    let matcher = ReminderMatcher::new(ManualClock::new(local(2026, 10, 14, 9, 0)));

    let report = matcher.tick(
        &[medicine_reminder(9, 0)],
        &NotificationPreferences::default(),
        &notifier,
    );
    assert_eq!(report.due, 1);
    assert_eq!(report.scheduled, 0);
    assert!(backend.posted().is_empty());
}

#[test]
fn disabled_category_is_suppressed() {
    let backend = RecordingBackend::granting();
    let notifier = Notifier::new(&backend);
    let matcher = ReminderMatcher::new(ManualClock::new(local(2026, 10, 14, 9, 0)));
    let prefs = NotificationPreferences {
        medicine_reminders: false,
        ..NotificationPreferences::default()
    };

    let report = matcher.tick(&[medicine_reminder(9, 0)], &prefs, &notifier);
    assert_eq!(report.suppressed, 1);
    assert!(backend.posted().is_empty());
}

#[test]
fn appointment_and_inventory_records_share_the_matcher() {
    let mut appointments = RecordList::new();
    appointments.push(AppointmentRecord {
        doctor: "Dr. Rivera".to_string(),
        specialty: "Cardiology".to_string(),
        time: local_utc(2026, 10, 20, 14, 15),
        location: "City Clinic".to_string(),
        address: "1 Main St".to_string(),
    });
    let mut inventory = RecordList::new();
    let expiry = chrono::NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
    inventory.push(InventoryItem::new("Ibuprofen", 8, 20, expiry, None).unwrap());
    inventory.push(
        InventoryItem::new(
            "Vitamin D",
            8,
            20,
            expiry,
            Some(InventoryReminder {
                dosage: "1 capsule".to_string(),
                schedule_time: local_utc(2026, 10, 14, 14, 15),
            }),
        )
        .unwrap(),
    );

    let mut reminders = appointments.reminders();
    reminders.extend(inventory.reminders());
    assert_eq!(reminders.len(), 2);

    let matcher = ReminderMatcher::new(ManualClock::new(local(2026, 10, 14, 14, 15)));
    let due = matcher.due(&reminders);
    let kinds: Vec<ReminderKind> = due.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![ReminderKind::Appointment, ReminderKind::InventoryDose]);
    assert_eq!(due[0].body, "Appointment with Dr. Rivera at City Clinic");
    assert_eq!(due[1].body, "Time to take Vitamin D - 1 capsule");
}
