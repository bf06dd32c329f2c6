//! Use-case services.
//!
//! Services compose the pure engines with caller-owned capabilities while
//! keeping editor state outside core.

pub mod annotation_service;
