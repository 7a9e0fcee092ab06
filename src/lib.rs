//! Electricity bill estimation for eight tariff groups with block pricing.

#[cfg(feature = "api")]
pub mod api;
/// Rate primitives, per-group calculators, and the dispatcher.
pub mod billing;
pub mod config;
pub mod io;
