//! Record stores.
//!
//! # Responsibility
//! - Own the ordered medicine collection and mirror it to the durable layer.
//! - Hold transient appointment/inventory lists and notification preferences.
//!
//! # Invariants
//! - The in-memory collection is the source of truth between loads.
//! - Every mutation rewrites the full collection, never a partial patch.
//! - Index-based removal outside `0..len` fails with `OutOfRange`.

pub mod medicine_store;
pub mod preferences;
pub mod record_list;
