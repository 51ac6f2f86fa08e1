//! Inventory submit flow, stock statistics and alerts.

use crate::clock::Clock;
use crate::model::inventory::InventoryItem;
use crate::model::reminder::ReminderSource;
use crate::notify::{NotificationBackend, Notifier};
use crate::service::medicine_service::AddOutcome;
use crate::store::preferences::NotificationPreferences;
use crate::store::record_list::RecordList;
use crate::validation::InventoryForm;

/// Items expiring within this many days count as "expiring soon".
pub const EXPIRY_WARNING_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryStats {
    pub low_stock: usize,
    pub expiring_soon: usize,
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryAlert {
    LowStock { index: usize, remaining: u32 },
    ExpiringSoon { index: usize, expiry_date: chrono::NaiveDate },
}

pub struct InventoryService<C: Clock, B: NotificationBackend> {
    clock: C,
    notifier: Notifier<B>,
}

impl<C: Clock, B: NotificationBackend> InventoryService<C, B> {
    pub fn new(clock: C, notifier: Notifier<B>) -> Self {
        Self { clock, notifier }
    }

    pub fn notifier(&self) -> &Notifier<B> {
        &self.notifier
    }

    /// Validates `form` against today's date and appends the item.
    ///
    /// A dose reminder is scheduled only when a non-blank dosage is attached.
    pub fn add_item(
        &self,
        inventory: &mut RecordList<InventoryItem>,
        form: InventoryForm,
    ) -> AddOutcome {
        let today = self.clock.now().date_naive();
        let item = match form.into_item(today) {
            Ok(item) => item,
            Err(report) => return AddOutcome::Invalid(report),
        };

        let confirmation = item.reminder().map(|reminder| {
            self.notifier
                .schedule(&reminder.title, &reminder.body, reminder.schedule_time)
        });
        let index = inventory.push(item);
        AddOutcome::Added {
            index,
            confirmation,
            due_now: false,
        }
    }

    pub fn stats(&self, inventory: &RecordList<InventoryItem>) -> InventoryStats {
        let today = self.clock.now().date_naive();
        let items = inventory.items();
        InventoryStats {
            low_stock: items.iter().filter(|item| item.low_stock()).count(),
            expiring_soon: items
                .iter()
                .filter(|item| item.expires_within(today, EXPIRY_WARNING_DAYS))
                .count(),
            total_items: items.len(),
        }
    }

    /// Low-stock and expiry alerts, honoring the matching preference switches.
    pub fn alerts(
        &self,
        inventory: &RecordList<InventoryItem>,
        preferences: &NotificationPreferences,
    ) -> Vec<InventoryAlert> {
        let today = self.clock.now().date_naive();
        let mut alerts = Vec::new();
        for (index, item) in inventory.items().iter().enumerate() {
            if preferences.low_stock_alerts && item.low_stock() {
                alerts.push(InventoryAlert::LowStock {
                    index,
                    remaining: item.remaining(),
                });
            }
            if preferences.expiry_alerts && item.expires_within(today, EXPIRY_WARNING_DAYS) {
                alerts.push(InventoryAlert::ExpiringSoon {
                    index,
                    expiry_date: item.expiry_date(),
                });
            }
        }
        alerts
    }
}
