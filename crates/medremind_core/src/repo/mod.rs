//! Durable key-value layer.
//!
//! # Responsibility
//! - Define the string-keyed, string-valued persistence contract.
//! - Keep SQLite details out of the stores built on top of it.
//!
//! # Invariants
//! - `set_value` fully replaces any previous value for the key.
//! - An absent key reads as `None`, never as an empty string.

pub mod kv_repo;
