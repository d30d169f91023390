//! API-compatible (e.g. de/serialisable) types.
//!
//! The types in this module are serialised in a client-friendly way, e.g.:
//!
//! - Field names are camelCase.
//! - Percentages are rounded for display.

pub mod admin;
pub mod auth;
pub mod ballot;
pub mod results;
