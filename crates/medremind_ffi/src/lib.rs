//! Flutter-facing bindings over `medremind_core`.

pub mod api;
