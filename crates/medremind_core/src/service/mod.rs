//! Submit-flow orchestration for each form.
//!
//! # Responsibility
//! - Validate input, send confirmation notifications, then mutate state.
//! - Keep UI/FFI callers away from store and notifier wiring.
//!
//! # Invariants
//! - Invalid input never reaches a store or the notifier.
//! - Notifications are requested before the store mutation, as one flow.

pub mod appointment_service;
pub mod inventory_service;
pub mod medicine_service;
