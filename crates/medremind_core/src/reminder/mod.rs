//! Reminder matching and the recurring watcher.
//!
//! # Responsibility
//! - Decide which reminders are due at the current minute.
//! - Drive the matcher on a fixed interval until torn down.
//!
//! # Invariants
//! - A reminder is due iff its local hour and minute equal the clock's.
//! - Every tick re-reads the current collection.
//! - No de-duplication across ticks; two ticks in one minute fire twice.

pub mod matcher;
pub mod watcher;
