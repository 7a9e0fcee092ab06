//! The billing engine: rate primitives, per-group calculators, and the
//! dispatcher.
//!
//! Everything here is a pure function over an immutable [`crate::config::TariffSchedule`]
//! and a tagged consumption payload; no state survives a call.

pub mod block;
pub mod dispatch;
pub mod flat;
pub mod rates;
pub mod types;

pub use dispatch::calculate;
