//! Flutter-facing bindings for provnote core.

pub mod api;
