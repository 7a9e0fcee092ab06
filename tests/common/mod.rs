//! Shared test fixtures for integration tests.

use tariff_bill::billing::types::ConsumptionPayload;
use tariff_bill::config::TariffSchedule;

/// Rounding tolerance for 2-decimal monetary comparisons.
pub const TOL: f64 = 0.011;

/// The schedule used across integration tests (built-in 2025 proposal).
pub fn default_schedule() -> TariffSchedule {
    TariffSchedule::proposal_2025()
}

/// One payload per tariff group, scaled so each group sees non-trivial
/// consumption. `scale` of 1.0 keeps the two-register household just
/// above the block threshold.
pub fn payloads_at_scale(scale: f64) -> Vec<ConsumptionPayload> {
    vec![
        ConsumptionPayload::HouseholdTwo {
            a1_kwh: 600.0 * scale,
            a2_kwh: 400.0 * scale,
        },
        ConsumptionPayload::HouseholdOne {
            total_kwh: 1000.0 * scale,
        },
        ConsumptionPayload::Group1 {
            high_kwh: 500.0 * scale,
            low_kwh: 250.0 * scale,
        },
        ConsumptionPayload::Group2 {
            high_kwh: 500.0 * scale,
            low_kwh: 250.0 * scale,
        },
        ConsumptionPayload::Group3 {
            high_kwh: 400.0 * scale,
            low_kwh: 300.0 * scale,
            demand_kw: 50.0 * scale,
            reactive_kvarh: 100.0 * scale,
        },
        ConsumptionPayload::Group4 {
            total_kwh: 1000.0 * scale,
        },
        ConsumptionPayload::Group7 {
            total_kwh: 1000.0 * scale,
        },
        ConsumptionPayload::Group8 {
            total_kwh: 1000.0 * scale,
        },
    ]
}
